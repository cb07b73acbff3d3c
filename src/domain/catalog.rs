//! Test catalog entities

use serde::Deserialize;

/// A speaking test prompt
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpeakingTest {
    pub id: String,
    pub question: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

/// A listening test with its uploaded audio clip
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListeningTest {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub audio_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speaking_test_deserializes_wire_shape() {
        let json = r#"{"id":"12","question":"Describe a memorable trip","createdAt":"2024-05-01"}"#;
        let test: SpeakingTest = serde_json::from_str(json).unwrap();
        assert_eq!(test.id, "12");
        assert_eq!(test.question, "Describe a memorable trip");
        assert_eq!(test.created_at.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn speaking_test_without_timestamp() {
        let json = r#"{"id":"3","question":"Q"}"#;
        let test: SpeakingTest = serde_json::from_str(json).unwrap();
        assert!(test.created_at.is_none());
    }

    #[test]
    fn listening_test_deserializes_wire_shape() {
        let json = r#"{"id":"7","question":"Listen and answer","audio_file":"clip7.mp3"}"#;
        let test: ListeningTest = serde_json::from_str(json).unwrap();
        assert_eq!(test.audio_file.as_deref(), Some("clip7.mp3"));
    }
}
