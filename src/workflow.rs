//! JSON-defined workflow execution.
//!
//! A workflow file is a JSON object with a `steps` array. Each step carries a
//! prompt, an action (`save` or `print`), and an optional output path. Steps
//! run strictly in file order, one dispatch at a time; a bad or failed step
//! is reported and the remaining steps still run.

use colored::Colorize;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::api::Client;

/// A workflow definition as loaded from disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One entry in the ordered task list. All fields optional in the file;
/// validation happens per step at execution time.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub prompt: Option<String>,
    pub action: Option<String>,
    pub output_file: Option<String>,
}

/// What a step will do once validated.
#[derive(Debug, PartialEq, Eq)]
enum StepPlan<'a> {
    Save { prompt: &'a str, output: &'a str },
    Print { prompt: &'a str },
}

/// Why a step cannot run. Reported as a warning; never halts the workflow.
#[derive(Debug, PartialEq, Eq)]
enum StepRejection {
    MissingPromptOrAction,
    MissingOutputFile,
    UnsupportedAction(String),
}

impl Step {
    fn plan(&self) -> Result<StepPlan<'_>, StepRejection> {
        let (prompt, action) = match (self.prompt.as_deref(), self.action.as_deref()) {
            (Some(p), Some(a)) if !p.is_empty() && !a.is_empty() => (p, a),
            _ => return Err(StepRejection::MissingPromptOrAction),
        };

        match action {
            "save" => match self.output_file.as_deref() {
                Some(output) if !output.is_empty() => Ok(StepPlan::Save { prompt, output }),
                _ => Err(StepRejection::MissingOutputFile),
            },
            "print" => Ok(StepPlan::Print { prompt }),
            other => Err(StepRejection::UnsupportedAction(other.to_string())),
        }
    }
}

/// Load a workflow definition from a JSON file.
pub fn load(path: &Path) -> anyhow::Result<Workflow> {
    let contents = std::fs::read_to_string(path)?;
    let workflow = serde_json::from_str(&contents)?;
    Ok(workflow)
}

/// Run every step of the workflow in order.
///
/// Validation happens before the dispatch, so a malformed step costs no
/// network call. Step outcomes are independent.
pub async fn run(client: &Client, workflow: &Workflow) {
    for (index, step) in workflow.steps.iter().enumerate() {
        debug!(step = index, "running workflow step");

        let plan = match step.plan() {
            Ok(plan) => plan,
            Err(StepRejection::MissingPromptOrAction) => {
                eprintln!(
                    "{}",
                    "Invalid workflow step: Missing prompt or action".red()
                );
                continue;
            }
            Err(StepRejection::MissingOutputFile) => {
                eprintln!(
                    "{}",
                    "Invalid workflow step: action `save` requires output_file".red()
                );
                continue;
            }
            Err(StepRejection::UnsupportedAction(action)) => {
                eprintln!("{}", format!("Unsupported action: {}", action).red());
                continue;
            }
        };

        let prompt = match &plan {
            StepPlan::Save { prompt, .. } | StepPlan::Print { prompt } => *prompt,
        };

        let response = match client.complete(prompt).await {
            Ok(response) => response,
            Err(e) => {
                eprintln!("{}", format!("API Error: {}", e).red());
                continue;
            }
        };

        match plan {
            StepPlan::Save { output, .. } => match std::fs::write(output, &response) {
                Ok(()) => println!(
                    "{}",
                    format!("Workflow step completed: Saved to {}", output).green()
                ),
                Err(e) => eprintln!(
                    "{}",
                    format!("Error writing workflow output {}: {}", output, e).red()
                ),
            },
            StepPlan::Print { .. } => {
                println!("{}: {}", "Workflow Result".blue().bold(), response);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(prompt: Option<&str>, action: Option<&str>, output: Option<&str>) -> Step {
        Step {
            prompt: prompt.map(String::from),
            action: action.map(String::from),
            output_file: output.map(String::from),
        }
    }

    #[test]
    fn test_parse_workflow_file() {
        let json = r#"{
            "steps": [
                {"prompt": "summarize X", "action": "save", "output_file": "a.txt"},
                {"prompt": "p2", "action": "print"}
            ]
        }"#;
        let workflow: Workflow = serde_json::from_str(json).unwrap();
        assert_eq!(workflow.steps.len(), 2);
        assert_eq!(workflow.steps[0].action.as_deref(), Some("save"));
        assert_eq!(workflow.steps[1].output_file, None);
    }

    #[test]
    fn test_parse_missing_steps_key() {
        let workflow: Workflow = serde_json::from_str("{}").unwrap();
        assert!(workflow.steps.is_empty());
    }

    #[test]
    fn test_plan_save_step() {
        let step = step(Some("summarize"), Some("save"), Some("a.txt"));
        assert_eq!(
            step.plan(),
            Ok(StepPlan::Save {
                prompt: "summarize",
                output: "a.txt"
            })
        );
    }

    #[test]
    fn test_plan_print_step() {
        let step = step(Some("p"), Some("print"), None);
        assert_eq!(step.plan(), Ok(StepPlan::Print { prompt: "p" }));
    }

    #[test]
    fn test_plan_rejects_missing_prompt() {
        let step = step(None, Some("print"), None);
        assert_eq!(step.plan(), Err(StepRejection::MissingPromptOrAction));
    }

    #[test]
    fn test_plan_rejects_missing_action() {
        let step = step(Some("p"), None, None);
        assert_eq!(step.plan(), Err(StepRejection::MissingPromptOrAction));
    }

    #[test]
    fn test_plan_rejects_save_without_output() {
        let step = step(Some("p"), Some("save"), None);
        assert_eq!(step.plan(), Err(StepRejection::MissingOutputFile));
    }

    #[test]
    fn test_plan_rejects_unknown_action() {
        let step = step(Some("p"), Some("bogus"), None);
        assert_eq!(
            step.plan(),
            Err(StepRejection::UnsupportedAction("bogus".to_string()))
        );
    }
}
