//! End-to-end tests: decode a playbook, translate it, write and read the workflow.
mod common;
use cacao_shuffle::prelude::*;
use common::*;

const ACTION_ID: &str = "22222222-0000-4000-8000-000000000002";
const START: &str = "11111111-0000-4000-8000-000000000001";
const END: &str = "33333333-0000-4000-8000-000000000003";

#[test]
fn test_sample_playbook_translation() {
    let playbook = Playbook::from_json_str(SAMPLE_PLAYBOOK_JSON).expect("sample decodes");
    assert_eq!(playbook.workflow.len(), 3);
    assert_eq!(playbook.playbook_variables.len(), 1);

    let translation = translate_sequential(&playbook);
    let workflow = &translation.workflow;
    assert!(translation.diagnostics.is_empty());

    assert_eq!(workflow.id, "5a9d0c5e-3f7b-4b0a-9a4e-2f0c9e1b7d11");
    assert_eq!(workflow.start, START);
    assert_eq!(workflow.created, 1683720000);
    assert_eq!(workflow.workflow_type, "CACAO playbook");

    // start and end pass through; the action step expands into two commands.
    assert_eq!(workflow.actions.len(), 4);
    assert_eq!(workflow.branches.len(), 3);

    let add_rule = workflow.action(ACTION_ID).unwrap();
    assert_eq!(add_rule.label, "1-Block IP");
    assert_eq!(add_rule.name, "POST");
    assert_eq!(
        add_rule.parameter("url").unwrap().value,
        "https://firewall.example.com/api/firewall/filter/addRule"
    );
    assert_eq!(
        add_rule.parameter("headers").unwrap().value,
        "Content-Type: application/json\n"
    );
    assert!(add_rule.parameter("body").unwrap().value.contains("$$attacker_ip$$"));
    assert!(add_rule.parameter("username").unwrap().configuration);

    let start_edge: Vec<_> = workflow.outgoing(START).collect();
    assert_eq!(start_edge.len(), 1);
    assert_eq!(start_edge[0].destination_id, ACTION_ID);

    let chain_edge: Vec<_> = workflow.outgoing(ACTION_ID).collect();
    assert_eq!(chain_edge[0].label, "command 1 to 2");
    let apply = workflow.action(&chain_edge[0].destination_id).unwrap();
    assert_eq!(apply.label, "2-Block IP");
    assert_eq!(
        apply.parameter("url").unwrap().value,
        "https://firewall.example.com/api/firewall/filter/apply"
    );

    let terminal: Vec<_> = workflow.outgoing(&apply.id).collect();
    assert_eq!(terminal[0].destination_id, END);
    assert_eq!(terminal[0].label, "command 2 to end");
}

#[test]
fn test_every_branch_points_at_known_actions() {
    let playbook = Playbook::from_json_str(SAMPLE_PLAYBOOK_JSON).unwrap();
    let workflow = translate(&playbook);
    for branch in &workflow.branches {
        assert!(workflow.action(&branch.source_id).is_some());
        assert!(workflow.action(&branch.destination_id).is_some());
    }
}

#[test]
fn test_output_json_shape() {
    let playbook = Playbook::from_slice(SAMPLE_PLAYBOOK_JSON.as_bytes()).unwrap();
    let workflow = translate_sequential(&playbook).workflow;
    let json = workflow.to_json_pretty().unwrap();

    assert!(json.contains("\"isStartNode\": true"));
    assert!(json.contains("\"source_id\""));
    assert!(json.contains("\"destination_id\""));
    assert!(json.contains("\"app_name\": \"http\""));
    // Field order follows the struct declaration.
    assert!(json.find("\"id\"").unwrap() < json.find("\"actions\"").unwrap());
    assert!(json.find("\"actions\"").unwrap() < json.find("\"branches\"").unwrap());
}

#[test]
fn test_save_and_load_workflow() {
    let playbook = Playbook::from_json_str(SAMPLE_PLAYBOOK_JSON).unwrap();
    let workflow = translate_sequential(&playbook).workflow;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shuffle.json");
    workflow.save(&path).unwrap();

    let loaded = Workflow::from_file(&path).unwrap();
    assert_eq!(loaded, workflow);
}

#[test]
fn test_load_playbook_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("playbook.json");
    std::fs::write(&path, SAMPLE_PLAYBOOK_JSON).unwrap();

    let playbook = Playbook::from_file(&path).unwrap();
    assert_eq!(playbook.name, "Block malicious IP on firewall");
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let result = Playbook::from_json_str("{ \"workflow\": [");
    assert!(matches!(result, Err(ParseError::Json(_))));

    let wrong_shape = Playbook::from_json_str("{ \"workflow\": 42 }");
    assert!(matches!(wrong_shape, Err(ParseError::Json(_))));

    let bad_timestamp = Playbook::from_json_str("{ \"created\": \"yesterday\" }");
    assert!(matches!(bad_timestamp, Err(ParseError::Json(_))));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Playbook::from_file(dir.path().join("absent.json"));
    match result {
        Err(ParseError::Io { path, .. }) => assert!(path.ends_with("absent.json")),
        other => panic!("Expected Io error, got {:?}", other.map(|p| p.id)),
    }
}

#[test]
fn test_sparse_playbook_translates_to_empty_workflow() {
    let playbook = Playbook::from_json_str("{}").unwrap();
    let translation = translate_sequential(&playbook);
    assert!(translation.workflow.actions.is_empty());
    assert!(translation.workflow.branches.is_empty());
    assert!(translation.diagnostics.is_empty());
}

#[test]
fn test_null_collections_decode_as_empty() {
    let json = r#"{
        "id": "playbook--p",
        "derived_from": null,
        "target_definitions": null,
        "workflow": {
            "start--11111111-0000-4000-8000-000000000001": {
                "on_completion": "end--33333333-0000-4000-8000-000000000003",
                "commands": null,
                "targets": null,
                "in_args": null
            },
            "end--33333333-0000-4000-8000-000000000003": {
                "commands": [{"type": "http-api", "command": "GET /x", "headers": null}],
                "targets": ["t"]
            }
        }
    }"#;
    let playbook = Playbook::from_json_str(json).unwrap();
    let start = playbook
        .workflow
        .get("start--11111111-0000-4000-8000-000000000001")
        .unwrap();
    assert!(start.commands.is_empty());
    assert!(start.targets.is_empty());
    assert!(start.in_args.is_empty());
    assert!(playbook.derived_from.is_empty());
    assert!(playbook.target_definitions.is_empty());

    let translation = translate_sequential(&playbook);
    assert_eq!(translation.workflow.actions.len(), 2);
    assert!(!translation.diagnostics.has_errors());
}

#[test]
fn test_summary_lists_actions_and_branches() {
    let playbook = Playbook::from_json_str(SAMPLE_PLAYBOOK_JSON).unwrap();
    let workflow = translate_sequential(&playbook).workflow;
    let summary = WorkflowSummary(&workflow).to_string();

    assert!(summary.contains("Block malicious IP on firewall"));
    assert!(summary.contains("--- ACTIONS (4) ---"));
    assert!(summary.contains("--- BRANCHES (3) ---"));
    assert!(summary.contains("https://firewall.example.com/api/firewall/filter/addRule"));
    assert!(!summary.contains("(dangling)"));
}
