use super::*;

#[test]
fn build_summarization_prompt_contains_marker() {
    let (system, user) = build_summarization_prompt("some conversation", None);
    assert!(system.contains("Conversation Summarization"));
    assert!(user.contains("some conversation"));
}

#[test]
fn build_summarization_prompt_appends_custom_instructions() {
    let (system, _) = build_summarization_prompt("conv", Some("focus on tests"));
    assert!(system.contains("## Additional Instructions"));
    assert!(system.contains("focus on tests"));
}

#[test]
fn build_brief_summary_prompt_is_brief() {
    let (system, user) = build_brief_summary_prompt("conversation text");
    assert!(system.contains("brief"));
    assert!(user.contains("conversation text"));
}

#[test]
fn parse_summary_response_extracts_both_tags() {
    let response = "<analysis>thinking here</analysis><summary>the summary</summary>";
    let parsed = parse_summary_response(response);
    assert_eq!(parsed.summary, "the summary");
    assert_eq!(parsed.analysis.as_deref(), Some("thinking here"));
}

#[test]
fn parse_summary_response_falls_back_to_raw_text() {
    let response = "no tags here";
    let parsed = parse_summary_response(response);
    assert_eq!(parsed.summary, "no tags here");
    assert!(parsed.analysis.is_none());
}

#[test]
fn parse_summary_response_missing_analysis() {
    let response = "<summary>only summary</summary>";
    let parsed = parse_summary_response(response);
    assert_eq!(parsed.summary, "only summary");
    assert!(parsed.analysis.is_none());
}
