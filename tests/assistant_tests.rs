use maqamctl::assistant::{
    consult, extract_tuning, Assistant, AssistantError, CommandAssistant, FALLBACK_EMPTY,
    FALLBACK_ERROR,
};
use std::cell::RefCell;

struct Canned(Result<String, String>);

impl Assistant for Canned {
    fn ask(&self, _prompt: &str) -> Result<String, AssistantError> {
        self.0.clone().map_err(AssistantError::Failed)
    }
}

#[derive(Default)]
struct Recording {
    prompts: RefCell<Vec<String>>,
}

impl Assistant for Recording {
    fn ask(&self, prompt: &str) -> Result<String, AssistantError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok("Bright and open.".to_string())
    }
}

#[test]
fn test_extract_tuning_from_prose() {
    let text = "Rast feels proud {mood} and bright.\n\
                ```json\n{\"tuning\": {\"E\": -50, \"B\": -50}}\n```\nEnjoy!";
    assert_eq!(
        extract_tuning(text),
        Some(vec![("B".to_string(), -50), ("E".to_string(), -50)])
    );
}

#[test]
fn test_extract_tuning_ignores_unrelated_json() {
    assert_eq!(extract_tuning("{\"mood\": \"sad\"}"), None);
    assert_eq!(extract_tuning("no structure at all"), None);
    assert_eq!(extract_tuning("{\"tuning\": {\"E\": \"flat\"}}"), None);
}

#[test]
fn test_extract_tuning_skips_to_later_object() {
    let text = "{\"note\": 1} then {\"tuning\": {\"F#\": -50}, \"name\": \"x\"}";
    assert_eq!(extract_tuning(text), Some(vec![("F#".to_string(), -50)]));
}

#[test]
fn test_consult_error_falls_back() {
    let suggestion = consult(&Canned(Err("quota".to_string())), "Bayati");
    assert_eq!(suggestion.text, FALLBACK_ERROR);
    assert_eq!(suggestion.tunings, None);
}

#[test]
fn test_consult_empty_answer_falls_back() {
    let suggestion = consult(&Canned(Ok("   ".to_string())), "Bayati");
    assert_eq!(suggestion.text, FALLBACK_EMPTY);
}

#[test]
fn test_consult_carries_text_and_tuning() {
    let answer = "Sikah: E half-flat. {\"tuning\": {\"E\": -50}}";
    let suggestion = consult(&Canned(Ok(answer.to_string())), "Sikah");
    assert_eq!(suggestion.text, answer);
    assert_eq!(suggestion.tunings, Some(vec![("E".to_string(), -50)]));
}

#[test]
fn test_consult_skips_blank_queries() {
    let assistant = Recording::default();
    consult(&assistant, "   ");
    assert!(assistant.prompts.borrow().is_empty());

    let suggestion = consult(&assistant, "Rast");
    assert_eq!(suggestion.text, "Bright and open.");
    assert_eq!(suggestion.tunings, None);
    assert!(assistant.prompts.borrow()[0].contains("\"Rast\""));
}

#[test]
fn test_missing_command_is_an_error() {
    let assistant = CommandAssistant::new("maqamctl-no-such-program", Vec::new());
    assert!(matches!(
        assistant.ask("hello"),
        Err(AssistantError::Spawn(_))
    ));
    assert_eq!(consult(&assistant, "hello").text, FALLBACK_ERROR);
}

#[cfg(unix)]
#[test]
fn test_command_assistant_round_trip() {
    let assistant = CommandAssistant::new("cat", Vec::new());
    let answer = assistant.ask("echo {\"tuning\": {\"B\": -50}}").unwrap();
    assert_eq!(answer, "echo {\"tuning\": {\"B\": -50}}");
}

#[cfg(unix)]
#[test]
fn test_command_assistant_handles_prompt_larger_than_pipe_buffer() {
    let prompt = "x".repeat(1 << 20);
    let expected_len = prompt.len();
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let assistant = CommandAssistant::new("cat", Vec::new());
        let _ = tx.send(assistant.ask(&prompt).map(|answer| answer.len()));
    });

    let answer = rx
        .recv_timeout(std::time::Duration::from_secs(10))
        .expect("assistant command did not finish");
    assert_eq!(answer.unwrap(), expected_len);
}
