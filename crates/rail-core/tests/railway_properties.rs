//! Propiedades observables del motor a través de la API pública.

use rail_core::{ChainError, ResolutionPolicy, Workflow};

#[derive(Debug, Clone, PartialEq)]
pub struct Amount(i64);

#[derive(Debug, Clone, PartialEq)]
pub struct Tag(String);

#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    note: &'static str,
}

rail_core::typed_step! {
    step AddOne {
        name: "add_one",
        input: Amount,
        output: Amount,
        run(_me, amount, _ctx) {
            Ok(Amount(amount.0 + 1))
        }
    }
}

rail_core::typed_step! {
    step Stringify {
        name: "stringify",
        input: Amount,
        output: Tag,
        run(_me, amount, _ctx) {
            Ok(Tag(format!("n={}", amount.0)))
        }
    }
}

rail_core::typed_step! {
    step Combine {
        name: "combine",
        input: (Amount, Tag, Payload),
        output: Tag,
        run(_me, (amount, tag, payload), _ctx) {
            Ok(Tag(format!("{}|{}|{}", amount.0, tag.0, payload.note)))
        }
    }
}

#[tokio::test]
async fn transitive_chaining_applies_steps_in_order() {
    let workflow = Workflow::new("sum");
    let mut run = workflow.activate(Amount(0));
    for _ in 0..5 {
        run.chain::<AddOne>().await;
    }
    let tag: Tag = run.chain::<Stringify>().await.resolve().await.unwrap();
    assert_eq!(tag, Tag("n=5".to_string()));
}

#[tokio::test]
async fn tuple_activation_feeds_a_tuple_step_exactly() {
    let workflow = Workflow::new("tuple_seed");
    let mut run = workflow.activate_all((Amount(1), Tag("x".to_string()), Payload { note: "obj" }));
    assert_eq!(run.memory().len(), 3, "each slot is its own entry");

    let tag: Tag = run.chain::<Combine>().await.resolve().await.unwrap();
    assert_eq!(tag, Tag("1|x|obj".to_string()));
}

#[tokio::test]
async fn latest_entry_shadows_older_ones() {
    let workflow = Workflow::new("shadow");
    let mut run = workflow.activate(Amount(1));
    run.track(Amount(2));

    let tag: Tag = run.chain::<Stringify>().await.resolve().await.unwrap();
    assert_eq!(tag, Tag("n=2".to_string()));
    assert_eq!(run.memory().count_of::<Amount>(), 2, "older entry is still enumerable");
}

#[tokio::test]
async fn strict_policy_flags_shadowed_resolution() {
    let workflow = Workflow::new("strict").with_policy(ResolutionPolicy::Strict);
    let mut run = workflow.activate(Amount(1));
    run.track(Amount(2));
    run.chain::<Stringify>().await;

    let err = run.resolve::<Tag>().await.unwrap_err();
    assert!(matches!(err.cause, ChainError::Ambiguous { candidates: 2, .. }));
}

#[tokio::test]
async fn resolve_without_matching_output_fails_cleanly() {
    let workflow = Workflow::new("no_output");
    let mut run = workflow.activate(Amount(1));
    let err = run.resolve::<Tag>().await.unwrap_err();
    assert!(matches!(err.cause, ChainError::Resolution { .. }));
    assert_eq!(err.workflow, "no_output");
}
