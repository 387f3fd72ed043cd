//! Composición dinámica: steps neutros encadenados sin tipos en el caller.

use rail_core::{StepDefinition, Pipeline, Workflow};

#[derive(Debug, Clone, PartialEq)]
pub struct Score(u32);

rail_core::typed_step! {
    step Bump {
        name: "bump",
        input: Score,
        output: Score,
        run(_me, score, _ctx) {
            Ok(Score(score.0 + 10))
        }
    }
}

rail_core::typed_step! {
    step Halve {
        name: "halve",
        input: Score,
        output: Score,
        run(_me, score, _ctx) {
            Ok(Score(score.0 / 2))
        }
    }
}

#[tokio::test]
async fn boxed_steps_run_in_insertion_order() {
    let steps: Vec<Box<dyn StepDefinition>> = Pipeline::start(Bump::new()).then(Halve::new())
                                                                          .then(Bump::new())
                                                                          .into_steps();

    let workflow = Workflow::new("dynamic");
    let mut run = workflow.activate(Score(10));
    for step in steps.iter() {
        run.chain_dyn(step.as_ref()).await;
    }
    // (10 + 10) / 2 + 10 = 20
    let score: Score = run.resolve().await.unwrap();
    assert_eq!(score, Score(20));

    let names: Vec<&str> = run.records().iter().map(|r| r.step.as_str()).collect();
    assert_eq!(names, vec!["bump", "halve", "bump"]);
}

#[tokio::test]
async fn pipeline_hash_matches_the_run_sequence() {
    let pipeline = Pipeline::start(Bump::new()).then(Halve::new());
    let hash = pipeline.definition_hash();

    let workflow = Workflow::new("hash_check");
    let score: Score = pipeline.run(&workflow, (Score(4),)).await.unwrap();
    assert_eq!(score, Score(7));
    assert_eq!(hash.len(), 64);
}
