//! Result classification and selection events / 结果分类与选中事件
//!
//! Maps raw matched documents to typed, presentation-ready records, and turns
//! a selected record into the ordered event sequence the client replays.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::schema::{Document, DocumentData, DocumentKind, FileOrigin};

/// Presentation kind of a classified result / 分类后结果的展示类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultKind {
    /// Rendered with profile photo + name / 以头像加名称展示
    User,
    /// Rendered with slate name, owner and preview thumbnails / 以名称、所有者与缩略图展示
    Slate,
    /// Rendered with a single preview thumbnail / 以单张缩略图展示
    File,
}

/// A typed, presentation-ready result / 类型化的展示结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypedResult {
    pub kind: ResultKind,
    pub document: Document,
}

/// Classify a matched document / 对匹配文档进行分类
///
/// Unrecognized kinds yield `None` and are excluded from presentation;
/// forward compatible, never an error.
pub fn classify(document: &Document) -> Option<TypedResult> {
    let kind = match document.kind {
        DocumentKind::User => ResultKind::User,
        DocumentKind::Slate => ResultKind::Slate,
        DocumentKind::File => ResultKind::File,
        DocumentKind::Unknown => {
            tracing::debug!(id = %document.id, "dropping result of unknown kind");
            return None;
        }
    };
    Some(TypedResult {
        kind,
        document: document.clone(),
    })
}

/// Navigation target emitted on selection / 选中时发出的导航目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavigateValue {
    Profile,
    Slate,
    Library,
}

/// One event in the selection sequence / 选中事件序列中的单个事件
///
/// The order within the returned sequence is the replay order: navigation
/// first, then any viewer signal, and `close-search` always last.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionEvent {
    Navigate {
        value: NavigateValue,
        data: serde_json::Value,
    },
    Signal {
        name: String,
        detail: serde_json::Value,
    },
}

impl SelectionEvent {
    fn signal(name: &str, detail: serde_json::Value) -> Self {
        Self::Signal {
            name: name.to_string(),
            detail,
        }
    }
}

/// Build the ordered event sequence for a selected result / 为选中结果构建事件序列
pub fn selection_events(result: &TypedResult) -> Vec<SelectionEvent> {
    let mut events = Vec::new();

    match &result.document.data {
        DocumentData::User(user) => {
            events.push(SelectionEvent::Navigate {
                value: NavigateValue::Profile,
                data: json!(user),
            });
        }
        DocumentData::Slate(slate) => {
            events.push(SelectionEvent::Navigate {
                value: NavigateValue::Slate,
                data: json!(slate),
            });
        }
        DocumentData::File(file_ref) => {
            match (file_ref.origin, &file_ref.slate) {
                (FileOrigin::Slate, Some(slate)) => {
                    events.push(SelectionEvent::Navigate {
                        value: NavigateValue::Slate,
                        data: json!(slate),
                    });
                }
                // Library files, and slate files whose container went missing,
                // fall back to the library view.
                _ => {
                    events.push(SelectionEvent::Navigate {
                        value: NavigateValue::Library,
                        data: serde_json::Value::Null,
                    });
                }
            }
            events.push(SelectionEvent::signal(
                "open-viewer",
                json!({ "index": file_ref.index }),
            ));
        }
    }

    events.push(SelectionEvent::signal("close-search", json!({})));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Slate, SlateData, SlateFile, User, UserData};

    fn user_doc() -> Document {
        Document::user(User {
            id: "1".to_string(),
            username: Some("ann".to_string()),
            data: UserData::default(),
        })
    }

    fn slate_doc() -> Document {
        Document::slate(Slate {
            id: "10".to_string(),
            slatename: Some("travel".to_string()),
            data: SlateData::default(),
            owner: None,
        })
    }

    fn file_doc(origin: FileOrigin, slate: Option<Slate>) -> Document {
        Document::file(
            SlateFile {
                id: "100".to_string(),
                title: Some("paris.jpg".to_string()),
                name: None,
                url: None,
            },
            3,
            origin,
            slate,
        )
    }

    #[test]
    fn test_classify_known_kinds() {
        assert_eq!(classify(&user_doc()).unwrap().kind, ResultKind::User);
        assert_eq!(classify(&slate_doc()).unwrap().kind, ResultKind::Slate);
        assert_eq!(
            classify(&file_doc(FileOrigin::Library, None)).unwrap().kind,
            ResultKind::File
        );
    }

    #[test]
    fn test_classify_drops_unknown_kind() {
        let mut doc = user_doc();
        doc.kind = DocumentKind::Unknown;
        assert!(classify(&doc).is_none());
    }

    #[test]
    fn test_unknown_kind_roundtrips_from_wire() {
        let json = r#"{"id":"9","type":"HOLOGRAM","data":{"user":{"id":"9"}}}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.kind, DocumentKind::Unknown);
        assert!(classify(&doc).is_none());
    }

    #[test]
    fn test_user_selection_sequence() {
        let result = classify(&user_doc()).unwrap();
        let events = selection_events(&result);
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            SelectionEvent::Navigate { value: NavigateValue::Profile, .. }
        ));
        assert!(matches!(&events[1], SelectionEvent::Signal { name, .. } if name == "close-search"));
    }

    #[test]
    fn test_slate_file_selection_navigates_then_opens_viewer() {
        let slate = Slate {
            id: "10".to_string(),
            slatename: Some("travel".to_string()),
            data: SlateData::default(),
            owner: None,
        };
        let result = classify(&file_doc(FileOrigin::Slate, Some(slate))).unwrap();
        let events = selection_events(&result);
        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            SelectionEvent::Navigate { value: NavigateValue::Slate, .. }
        ));
        let SelectionEvent::Signal { name, detail } = &events[1] else {
            panic!("expected the viewer signal second");
        };
        assert_eq!(name, "open-viewer");
        assert_eq!(detail["index"], 3);
        assert!(matches!(&events[2], SelectionEvent::Signal { name, .. } if name == "close-search"));
    }

    #[test]
    fn test_library_file_selection_targets_library() {
        let result = classify(&file_doc(FileOrigin::Library, None)).unwrap();
        let events = selection_events(&result);
        assert!(matches!(
            &events[0],
            SelectionEvent::Navigate { value: NavigateValue::Library, .. }
        ));
        assert_eq!(events.len(), 3);
    }
}
