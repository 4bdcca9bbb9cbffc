use std::sync::Once;

use pretty_assertions::assert_eq;
use suggest_core::{
    CountStore, Features, FeatureValue, Model, ModelError, ModelSettings, StopWordCounter,
    TableSnapshot, TableStore, Update,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(suggest_logging::initialize_for_tests);
}

fn three_documents() -> Vec<Update> {
    vec![
        Update::new("positive", Features::new().text("q", "foo bar baz")),
        Update::new("negative", Features::new().text("q", "foo foo bar baz zap zoo")),
        Update::new("negative", Features::new().text("q", "map pap mee zap")),
    ]
}

/// Closed-form posterior for "foo" after training on [`three_documents`].
fn expected_foo_posterior() -> (f64, f64) {
    let unique_words = 8.0;
    let positive_words = 3.0;
    let negative_words = 10.0;
    let foo_positive = 1.0;
    let foo_negative = 2.0;
    let positive = 1.0;
    let negative = 2.0;
    let pseudo_count = 1.0;

    let up = positive / (positive + negative)
        * ((foo_positive + pseudo_count) / (positive_words + unique_words));
    let un = negative / (positive + negative)
        * ((foo_negative + pseudo_count) / (negative_words + unique_words));
    let p = up / (up + un);
    (p, 1.0 - p)
}

fn assert_foo_posterior(model: &Model) {
    for features in [
        Features::new().text("q", "foo"),
        Features::new().categorical("q", "foo"),
    ] {
        let prediction = model.predict(&features);
        let (p, n) = expected_foo_posterior();
        assert_eq!(
            prediction.classes().collect::<Vec<_>>(),
            vec!["negative", "positive"]
        );
        assert!((prediction.get("positive").unwrap() - p).abs() < 1e-6);
        assert!((prediction.get("negative").unwrap() - n).abs() < 1e-6);
    }
}

#[test]
fn batch_update_matches_closed_form() {
    init_logging();
    let mut model: Model = Model::default();
    model.batch_update(three_documents());

    let store = model.store();
    assert_eq!(store.vocabulary_size("q"), 8);
    assert_eq!(store.total_word_count_in_class("q", "positive"), 3);
    assert_eq!(store.total_word_count_in_class("q", "negative"), 10);
    assert_eq!(store.word_count_in_class("q", "negative", "foo"), 2);
    assert_eq!(store.prior_count("negative"), 2);
    assert_eq!(store.total_observation_count(), 3);

    assert_foo_posterior(&model);
}

#[test]
fn batch_update_split_across_calls() {
    init_logging();
    let documents = three_documents();
    let mut model: Model = Model::default();
    model.batch_update(&documents[..2]);
    model.batch_update(&documents[2..]);

    assert_foo_posterior(&model);
}

#[test]
fn one_by_one_equals_batch() {
    init_logging();
    let documents = vec![
        Update::new(
            "spam",
            Features::new()
                .text("subject", "Cheap pills, cheap!")
                .categorical("sender", "bulk@example.com"),
        ),
        Update::new("ham", Features::new().text("subject", "Lunch tomorrow?")),
        Update::new("ham", Features::new().categorical("sender", "ole@example.com")),
        Update::new("spam", Features::new()),
    ];

    let mut batched: Model = Model::default();
    batched.batch_update(&documents);

    let mut single: Model = Model::default();
    for document in &documents {
        single.update(&document.outcome, &document.features);
    }

    assert_eq!(batched.store(), single.store());
    let probe = Features::new()
        .text("subject", "cheap lunch")
        .categorical("sender", "ole@example.com");
    assert_eq!(batched.predict(&probe), single.predict(&probe));
}

#[test]
fn order_of_updates_does_not_matter() {
    init_logging();
    let mut forward: Model = Model::default();
    forward.batch_update(three_documents());

    let mut reversed: Model = Model::default();
    reversed.batch_update(three_documents().into_iter().rev());

    assert_eq!(forward.store(), reversed.store());
}

#[test]
fn every_feature_increments_the_prior() {
    init_logging();
    let mut model: Model = Model::default();
    let features = Features::new()
        .text("subject", "hello world")
        .text("body", "long text here")
        .categorical("sender", "ole");
    model.update("inbox", &features);

    let store = model.store();
    assert_eq!(store.prior_count("inbox"), 3);
    assert_eq!(store.total_observation_count(), 3);
}

#[test]
fn observation_without_features_changes_nothing() {
    init_logging();
    let mut model: Model = Model::default();
    model.update("inbox", &Features::new());

    assert!(model.store().is_empty());
    assert!(model.predict(&Features::new()).is_empty());
}

#[test]
fn categorical_values_are_not_tokenized() {
    init_logging();
    let mut model: Model = Model::default();
    model.update("n", &Features::new().categorical("user", "The Ole!"));

    let store = model.store();
    assert!(store.is_known_word("user", "The Ole!"));
    assert_eq!(store.word_count_in_class("user", "n", "The Ole!"), 1);
    assert_eq!(store.total_word_count_in_class("user", "n"), 1);
}

#[test]
fn text_updates_count_each_occurrence() {
    init_logging();
    let mut model: Model = Model::default();
    model.update("p", &Features::new().text("q", "Awesome awesome, the OK"));

    let store = model.store();
    assert_eq!(store.word_count_in_class("q", "p", "awesome"), 2);
    assert_eq!(store.word_count_in_class("q", "p", "ok"), 1);
    assert!(!store.is_known_word("q", "the"));
    assert_eq!(store.total_word_count_in_class("q", "p"), 3);
}

#[test]
fn counts_never_decrease() {
    init_logging();
    let mut model: Model = Model::default();
    let mut previous = model.store().snapshot();

    for update in three_documents().into_iter().chain(three_documents()) {
        model.update(&update.outcome, &update.features);
        let current = model.store().snapshot();
        assert_monotone(&previous, &current);
        previous = current;
    }
}

fn assert_monotone(before: &TableSnapshot, after: &TableSnapshot) {
    assert!(after.total_observations >= before.total_observations);
    for (class, count) in &before.priors {
        assert!(after.priors[class] >= *count);
    }
    for (name, feature) in &before.features {
        let later = &after.features[name];
        assert!(later.known_words.is_superset(&feature.known_words));
        for (class, total) in &feature.total_word_counts {
            assert!(later.total_word_counts[class] >= *total);
        }
        for (class, words) in &feature.word_counts {
            for (word, count) in words {
                assert!(later.word_counts[class][word] >= *count);
            }
        }
    }
}

#[test]
fn custom_word_counter_is_used_for_training_and_prediction() {
    init_logging();
    let mut model =
        Model::new(TableStore::new()).with_word_counter(StopWordCounter::with_stop_words(["zap"]));
    model.batch_update(three_documents());

    assert!(!model.store().is_known_word("q", "zap"));
    assert_eq!(model.store().vocabulary_size("q"), 7);
}

#[test]
fn model_runs_against_a_borrowed_store() {
    init_logging();
    let mut store = TableStore::new();
    {
        let mut model = Model::new(&mut store);
        model.batch_update(three_documents());
    }
    assert_eq!(store.total_observation_count(), 3);
}

#[test]
fn invalid_pseudo_counts_are_rejected() {
    init_logging();
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(ModelSettings::with_pseudo_count(bad).is_err(), "{bad} accepted");
    }

    let settings = ModelSettings { pseudo_count: -0.5 };
    let result = Model::with_settings(TableStore::new(), settings);
    assert!(matches!(result, Err(ModelError::InvalidPseudoCount(v)) if v == -0.5));
}

#[test]
fn feature_values_expose_their_kind() {
    let features: Features = [
        ("q", FeatureValue::Text("awesome".into())),
        ("user", FeatureValue::Categorical("ole".into())),
    ]
    .into_iter()
    .collect();

    assert!(features.get("q").unwrap().is_text());
    assert!(!features.get("user").unwrap().is_text());
    assert_eq!(features.get("user").unwrap().as_str(), "ole");
    assert_eq!(features.len(), 2);
}
