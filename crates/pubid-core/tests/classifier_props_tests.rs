#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use pubid_core::classify::{classify, is_hyphenated_uuid, IdentifierClass};
use pubid_core::{generate_candidates, short_code, SHORT_CODE_LEN};

proptest! {
    #[test]
    fn prop_every_string_has_one_class(s in ".{0,48}") {
        let class = classify(&s);
        let expected = if is_hyphenated_uuid(&s) {
            IdentifierClass::Uuid
        } else if s.chars().count() <= SHORT_CODE_LEN {
            IdentifierClass::Short
        } else {
            IdentifierClass::Opaque
        };
        prop_assert_eq!(class, expected);
    }

    #[test]
    fn prop_generated_uuid_is_never_short(bytes in any::<[u8; 16]>(), upper in any::<bool>()) {
        let mut s = uuid::Uuid::from_bytes(bytes).hyphenated().to_string();
        if upper {
            s = s.to_uppercase();
        }
        prop_assert_eq!(classify(&s), IdentifierClass::Uuid);
    }

    #[test]
    fn prop_short_code_shape(key in "(drafts\\.)?[a-z]{1,8}\\.[A-Za-z0-9-]{0,24}") {
        let code = short_code(&key);
        prop_assert!(code.chars().count() <= SHORT_CODE_LEN);
        prop_assert_eq!(code.to_lowercase(), code.clone());
        prop_assert_ne!(classify(&code), IdentifierClass::Opaque);
    }

    #[test]
    fn prop_draft_marker_does_not_change_code(key in "[a-z]{1,8}\\.[A-Za-z0-9]{1,24}") {
        let draft = format!("drafts.{}", key);
        prop_assert_eq!(short_code(&draft), short_code(&key));
    }

    #[test]
    fn prop_short_candidates_end_with_identifier(id in "[a-z0-9]{1,8}") {
        let candidates = generate_candidates("event", &id, classify(&id));
        prop_assert_eq!(candidates.len(), 3);
        for c in &candidates {
            prop_assert!(c.ends_with(&id));
        }
    }
}
