//! Converter sessions with preferences, rates and history together

use std::cell::RefCell;

use pretty_assertions::assert_eq;
use smartconvert_core::session::INVALID_INPUT;
use smartconvert_core::{
    Converter, Dimension, HistoryEntry, HistorySink, Output, Preferences, RateBook,
};

#[derive(Default)]
struct Recorder(RefCell<Vec<HistoryEntry>>);

impl HistorySink for Recorder {
    fn record(&self, entry: &HistoryEntry) {
        self.0.borrow_mut().push(entry.clone());
    }
}

#[test]
fn test_precision_setting() {
    let mut prefs = Preferences::default();
    let rates = RateBook::new();
    let history = Recorder::default();

    for (precision, expected) in [(2, "0.33"), (4, "0.3333"), (8, "0.33333333")] {
        prefs.set_precision(precision);
        let mut c = Converter::new(Dimension::Time, &prefs, &rates, &history);
        c.set_from_unit("s").unwrap();
        c.set_to_unit("min").unwrap();
        c.set_input("20");
        assert_eq!(c.convert().unwrap().text(), expected);
    }
}

#[test]
fn test_trailing_zeros_trimmed() {
    let prefs = Preferences::default();
    let rates = RateBook::new();
    let history = Recorder::default();
    let mut c = Converter::new(Dimension::Distance, &prefs, &rates, &history);
    c.set_from_unit("km").unwrap();
    c.set_to_unit("m").unwrap();
    c.set_input("1.5");
    assert_eq!(
        c.convert().unwrap(),
        &Output::Number {
            value: 1500.0,
            text: "1500".into()
        }
    );
}

#[test]
fn test_currency_session() {
    let mut prefs = Preferences::default();
    prefs.set_preferred_unit(Dimension::Currency, "EUR");
    let history = Recorder::default();

    let pending = RateBook::new();
    let mut c = Converter::new(Dimension::Currency, &prefs, &pending, &history);
    assert_eq!((c.from_unit(), c.to_unit()), ("EUR", "USD"));
    c.set_input("10");
    assert_eq!(c.convert().unwrap().text(), "Loading...");
    assert_eq!(c.rate_info(), None);

    let mut failed = RateBook::new();
    failed.fail("timeout");
    let mut c = Converter::new(Dimension::Currency, &prefs, &failed, &history);
    c.set_input("10");
    assert_eq!(c.convert().unwrap().text(), "Rate N/A");
    assert!(history.0.borrow().is_empty());

    let ready = RateBook::with_defaults();
    let mut c = Converter::new(Dimension::Currency, &prefs, &ready, &history);
    c.set_input("92");
    assert_eq!(c.convert().unwrap().text(), "100");
    assert_eq!(c.rate_info().as_deref(), Some("1 EUR = 1.0870 USD"));
    assert_eq!(history.0.borrow().len(), 1);
}

#[test]
fn test_chained_swaps() {
    let prefs = Preferences::default();
    let rates = RateBook::new();
    let history = Recorder::default();
    let mut c = Converter::new(Dimension::Weight, &prefs, &rates, &history);
    c.set_input("10");
    assert_eq!(c.convert().unwrap().text(), "22.0462");
    assert_eq!(c.swap().unwrap().text(), "10");
    assert_eq!(c.swap().unwrap().text(), "22.0462");
    // Swaps re-evaluate without recording
    assert_eq!(history.0.borrow().len(), 1);
}

#[test]
fn test_history_entry_contents() {
    let prefs = Preferences::default();
    let rates = RateBook::new();
    let history = Recorder::default();
    let mut c = Converter::new(Dimension::Speed, &prefs, &rates, &history);
    c.set_input(" 10 ");
    c.convert().unwrap();
    c.set_input("");
    c.convert().unwrap();
    c.set_input("ten");
    assert_eq!(c.convert().unwrap().text(), INVALID_INPUT);

    let recorded = history.0.borrow();
    assert_eq!(recorded.len(), 1);
    let entry = &recorded[0];
    assert_eq!(entry.dimension, Dimension::Speed);
    assert_eq!((entry.from_unit.as_str(), entry.to_unit.as_str()), ("m/s", "km/h"));
    assert_eq!((entry.from_value.as_str(), entry.to_value.as_str()), ("10", "36"));
}

#[test]
fn test_every_quick_example_converts() {
    let prefs = Preferences::default();
    let rates = RateBook::with_defaults();
    let history = Recorder::default();
    for dimension in Dimension::all() {
        for example in dimension.examples() {
            let mut c = Converter::new(dimension, &prefs, &rates, &history);
            let output = c.apply_example(example).unwrap();
            assert!(output.value().is_some(), "{}", example.label);
        }
    }
}
