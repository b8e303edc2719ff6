use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(element: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let hx_endpoint = element
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        hx_endpoint, endpoint,
        "want element with attribute {attribute}=\"{endpoint}\", got {hx_endpoint:?}"
    );
}

#[track_caller]
pub(crate) fn assert_form_submit_button_with_text(form: &ElementRef<'_>, text: &str) {
    let submit_button = form
        .select(&Selector::parse("button").unwrap())
        .next()
        .expect("No button found");

    assert_eq!(
        submit_button.value().attr("type").unwrap_or_default(),
        "submit",
        "want submit button with type=\"submit\""
    );
    let got_text = submit_button.text().collect::<Vec<_>>().join("");
    let got_text = got_text.trim();
    assert_eq!(text, got_text);
}

/// The values of the options of the select named `select_name`, in order.
#[track_caller]
pub(crate) fn get_select_options(html: &Html, select_name: &str) -> Vec<String> {
    let selector = Selector::parse(&format!("select[name={select_name}] option")).unwrap();

    html.select(&selector)
        .map(|option| option.value().attr("value").unwrap_or_default().to_owned())
        .collect()
}

/// The value of the selected option of the select named `select_name`.
#[track_caller]
pub(crate) fn get_selected_option(html: &Html, select_name: &str) -> Option<String> {
    let selector =
        Selector::parse(&format!("select[name={select_name}] option[selected]")).unwrap();

    html.select(&selector)
        .next()
        .map(|option| option.value().attr("value").unwrap_or_default().to_owned())
}

/// The value attribute of the input named `input_name`.
#[track_caller]
pub(crate) fn get_input_value(html: &Html, input_name: &str) -> Option<String> {
    let selector = Selector::parse(&format!("input[name={input_name}]")).unwrap();

    html.select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No input found with name \"{input_name}\""))
        .value()
        .attr("value")
        .map(str::to_owned)
}
