mod common;

use balance_core::domain::Client;
use balance_core::view::{ClientRoster, InvoiceLedger};
use common::{date, invoice};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: the roster is ordered by identifier and free of duplicates
    /// for any input order.
    #[test]
    fn roster_is_sorted_and_unique(names in prop::collection::vec("[a-e]{1,3}", 0..40)) {
        let mut roster = ClientRoster::new();
        roster.replace_all(names.iter().map(Client::new));

        let identifiers: Vec<&str> = roster.clients().iter().map(Client::identifier).collect();
        prop_assert!(identifiers.windows(2).all(|pair| pair[0] < pair[1]));

        let mut expected = names.clone();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(identifiers, expected);
    }

    /// Property: replacing the ledger yields ascending dates, and invoices on
    /// the same day keep their input order.
    #[test]
    fn ledger_is_sorted_and_stable(entries in prop::collection::vec((1u32..=28, 0u64..10_000), 0..60)) {
        let client = Client::new("x");
        let input: Vec<_> = entries
            .iter()
            .enumerate()
            .map(|(index, (day, cents))| (index, invoice(&client, date(2019, 7, *day), *cents)))
            .collect();

        let mut ledger = InvoiceLedger::new();
        ledger.replace_all(input.iter().map(|(_, invoice)| invoice.clone()));

        let mut expected = input.clone();
        expected.sort_by_key(|(index, invoice)| (invoice.date(), *index));
        let expected: Vec<_> = expected.into_iter().map(|(_, invoice)| invoice).collect();
        prop_assert_eq!(ledger.invoices(), expected.as_slice());

        let total: u64 = entries.iter().map(|(_, cents)| cents).sum();
        prop_assert_eq!(ledger.total().cents(), total);
    }

    /// Property: inserting one at a time gives the same order as a bulk replace.
    #[test]
    fn incremental_inserts_match_bulk_replace(days in prop::collection::vec(1u32..=28, 0..40)) {
        let client = Client::new("x");
        let invoices: Vec<_> = days
            .iter()
            .enumerate()
            .map(|(index, day)| invoice(&client, date(2019, 7, *day), index as u64))
            .collect();

        let mut bulk = InvoiceLedger::new();
        bulk.replace_all(invoices.clone());
        let mut incremental = InvoiceLedger::new();
        for invoice in invoices {
            incremental.insert(invoice);
        }
        prop_assert_eq!(bulk.invoices(), incremental.invoices());
    }
}
