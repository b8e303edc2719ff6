//! The pie chart of expenses by category.
//!
//! The chart is an ECharts configuration serialized to JSON. It is rendered
//! together with its container and an inline script so that it is redrawn
//! each time htmx swaps in a new tracker partial.

use charming::{
    Chart,
    component::Legend,
    element::{Color, ItemStyle, JsFunction, Label, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{html::CARD_STYLE, transaction::CategoryTotal};

/// The HTML element ID of the chart container.
const CHART_ID: &str = "category-chart";

/// Slice colours, reused in order when there are more categories than colours.
const SLICE_COLORS: [&str; 7] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82CA9D", "#FF6B6B",
];

/// Renders the card with the expense categories pie chart.
///
/// Returns `None` if there are no expenses to show.
pub(super) fn category_chart_view(breakdown: &[CategoryTotal]) -> Option<Markup> {
    if breakdown.is_empty() {
        return None;
    }

    let options = category_chart(breakdown).to_string();

    Some(html! {
        section class={ (CARD_STYLE) " mb-6" }
        {
            h2 class="text-xl font-semibold" { "Expense Categories" }
            p class="text-sm text-gray-600 dark:text-gray-400 mb-4"
            {
                "Breakdown of your spending by category"
            }

            div id=(CHART_ID) class="min-h-[300px] w-full" {}

            script { (chart_script(&options)) }
        }
    })
}

fn category_chart(breakdown: &[CategoryTotal]) -> Chart {
    let data: Vec<(f64, &str)> = breakdown
        .iter()
        .map(|category_total| (category_total.total, category_total.category.label()))
        .collect();

    Chart::new()
        .color(SLICE_COLORS.iter().map(|&color| Color::from(color)).collect())
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0%"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["60%", "80%"])
                .center(vec!["50%", "45%"])
                .avoid_label_overlap(false)
                .item_style(
                    ItemStyle::new()
                        .border_radius(4)
                        .border_color("#fff")
                        .border_width(2),
                )
                .label(Label::new().show(false))
                .data(data),
        )
}

fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-IN', {
              style: 'currency',
              currency: 'INR'
            });
            return currencyFormatter.format(number);",
    )
}

fn chart_script(options: &str) -> PreEscaped<String> {
    PreEscaped(format!(
        r#"(function() {{
            const chartDom = document.getElementById("{CHART_ID}");
            const existing = echarts.getInstanceByDom(chartDom);
            if (existing) {{
                existing.dispose();
            }}
            const chart = echarts.init(chartDom);
            const option = {options};
            chart.setOption(option);

            window.addEventListener('resize', () => chart.resize());

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }};
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }})();"#
    ))
}
