//! Common test utilities for building playbooks.
use cacao_shuffle::prelude::*;

#[allow(dead_code)]
pub const START_ID: &str = "00000000-aaaa-4aaa-8aaa-000000000000";
#[allow(dead_code)]
pub const STEP_ID: &str = "11111111-1111-1111-1111-111111111111";
#[allow(dead_code)]
pub const END_ID: &str = "99999999-9999-9999-9999-999999999999";

#[allow(dead_code)]
pub const SAMPLE_PLAYBOOK_JSON: &str = include_str!("../data/playbook.json");

#[allow(dead_code)]
pub fn key(kind: &str, id: &str) -> String {
    format!("{}--{}", kind, id)
}

/// An `http` command with the given request line.
#[allow(dead_code)]
pub fn http_command(line: &str) -> Command {
    Command {
        command_type: "http".to_string(),
        command: line.to_string(),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn step(name: &str, on_completion: Option<&str>, commands: Vec<Command>) -> Step {
    Step {
        name: name.to_string(),
        on_completion: on_completion.map(str::to_string),
        commands,
        ..Default::default()
    }
}

/// A playbook with the given steps and no target or auth definitions.
#[allow(dead_code)]
pub fn playbook_with(steps: Vec<(String, Step)>) -> Playbook {
    Playbook {
        playbook_type: "playbook".to_string(),
        id: "playbook--abcdef00-0000-4000-8000-000000000000".to_string(),
        name: "Test playbook".to_string(),
        workflow: steps.into_iter().collect(),
        ..Default::default()
    }
}

/// One `action--STEP_ID` step completing into an empty `end--END_ID` step.
#[allow(dead_code)]
pub fn single_action_playbook(commands: Vec<Command>, targets: Vec<&str>) -> Playbook {
    let mut action = step("Block IP", Some(&key("end", END_ID)), commands);
    action.targets = targets.into_iter().map(str::to_string).collect();
    playbook_with(vec![
        (key("action", STEP_ID), action),
        (key("end", END_ID), step("End", None, vec![])),
    ])
}

#[allow(dead_code)]
pub fn domain_target(domain: &str, port: Option<&str>) -> Target {
    Target {
        target_type: "http-api".to_string(),
        name: domain.to_string(),
        address: Address {
            domain: vec![domain.to_string()],
            ..Default::default()
        },
        port: port.map(str::to_string),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn auth(auth_type: &str) -> AuthenticationInfo {
    AuthenticationInfo {
        auth_type: auth_type.to_string(),
        name: "credentials".to_string(),
        ..Default::default()
    }
}

/// A translator with counter-based identifiers.
#[allow(dead_code)]
pub fn sequential_translator() -> Translator {
    Translator::builder().with_ids(SequentialIds::new()).build()
}

#[allow(dead_code)]
pub fn translate_sequential(playbook: &Playbook) -> Translation {
    sequential_translator().translate_with_report(playbook)
}
