//! The saved transactions together with the form used to change them.

use time::Date;

use crate::{
    Error,
    transaction::{Draft, SubmitOutcome, TransactionStore},
};

/// Everything the tracker page shows: the saved transactions and the
/// contents of the transaction form.
#[derive(Debug)]
pub struct Tracker {
    store: TransactionStore,
    draft: Draft,
}

impl Tracker {
    /// Create a tracker with an empty form.
    pub fn new(store: TransactionStore) -> Self {
        Self {
            store,
            draft: Draft::default(),
        }
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Save the form, see [Draft::submit].
    pub fn submit(&mut self, today: Date) -> Result<SubmitOutcome, Error> {
        self.draft.submit(&mut self.store, today)
    }

    /// Load the transaction `id` into the form for editing.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no transaction with `id`.
    pub fn begin_edit(&mut self, id: &str) -> Result<(), Error> {
        let transaction = self.store.get(id).ok_or(Error::NotFound)?;
        self.draft.begin_edit(transaction);

        Ok(())
    }

    /// Delete the transaction `id`, clearing the form if it was being edited.
    ///
    /// Returns `false` if there is no transaction with `id`.
    pub fn delete(&mut self, id: &str) -> Result<bool, Error> {
        let removed = self.store.remove(id)?;
        self.draft.forget(id);

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        storage::create_key_value_table,
        transaction::{Category, SubmitOutcome, TransactionStore, TransactionType},
    };

    use super::Tracker;

    fn get_test_tracker() -> Tracker {
        let connection = Connection::open_in_memory().unwrap();
        create_key_value_table(&connection).unwrap();

        Tracker::new(TransactionStore::load(connection))
    }

    fn add_expense(tracker: &mut Tracker, amount: &str, category: Category) -> String {
        let draft = tracker.draft_mut();
        draft.set_type(TransactionType::Expense);
        draft.set_amount(amount);
        draft.set_category(Some(category));

        match tracker.submit(date!(2025 - 10 - 19)).unwrap() {
            SubmitOutcome::Inserted(id) => id,
            outcome => panic!("want inserted transaction, got {outcome:?}"),
        }
    }

    #[test]
    fn begin_edit_fills_form() {
        let mut tracker = get_test_tracker();
        let id = add_expense(&mut tracker, "100", Category::Food);

        tracker.begin_edit(&id).unwrap();

        assert_eq!(tracker.draft().editing_id(), Some(id.as_str()));
        assert_eq!(tracker.draft().amount(), "100");
        assert_eq!(tracker.draft().category(), Some(Category::Food));
    }

    #[test]
    fn begin_edit_unknown_id_is_not_found() {
        let mut tracker = get_test_tracker();

        assert_eq!(tracker.begin_edit("missing"), Err(Error::NotFound));
        assert_eq!(tracker.draft().editing_id(), None);
    }

    #[test]
    fn deleting_edit_target_clears_form() {
        let mut tracker = get_test_tracker();
        let id = add_expense(&mut tracker, "100", Category::Food);
        tracker.begin_edit(&id).unwrap();

        assert!(tracker.delete(&id).unwrap());

        assert!(tracker.store().transactions().is_empty());
        assert_eq!(tracker.draft().editing_id(), None);
        assert_eq!(tracker.draft().amount(), "");
    }

    #[test]
    fn deleting_other_transaction_keeps_form() {
        let mut tracker = get_test_tracker();
        let first = add_expense(&mut tracker, "100", Category::Food);
        let second = add_expense(&mut tracker, "40", Category::Bills);
        tracker.begin_edit(&first).unwrap();

        assert!(tracker.delete(&second).unwrap());

        assert_eq!(tracker.draft().editing_id(), Some(first.as_str()));
        assert_eq!(tracker.store().transactions().len(), 1);
    }

    #[test]
    fn deleting_unknown_id_changes_nothing() {
        let mut tracker = get_test_tracker();
        add_expense(&mut tracker, "100", Category::Food);

        assert!(!tracker.delete("missing").unwrap());

        assert_eq!(tracker.store().transactions().len(), 1);
    }
}
