use proptest::prelude::*;
use server::api::classify_status;
use server::model::{SendEmailRequest, UserSearchParams};

proptest! {
    #[test]
    fn test_search_offset_is_page_times_size(page in 0u32..10_000, size in prop::sample::select(vec![10u32, 20, 50, 100])) {
        let params = UserSearchParams::for_page("query", page, size);
        prop_assert_eq!(params.offset, page * size);
        prop_assert_eq!(params.limit, size);
    }

    #[test]
    fn test_only_2xx_statuses_succeed(status in 100u16..600) {
        let result = classify_status("u", status, "reason");
        prop_assert_eq!(result.is_ok(), (200..300).contains(&status));
        if let Err(error) = result {
            prop_assert_eq!(error.is_authentication(), status == 401 || status == 403);
        }
    }

    #[test]
    fn test_send_request_keeps_user_order(ids in prop::collection::vec("[a-z0-9]{1,8}", 0..20)) {
        let request = SendEmailRequest {
            html: "<p>x</p>".to_string(),
            subject: "s".to_string(),
            user_ids: ids.clone(),
            preferred_language: None,
            country_code: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        let encoded: Vec<String> = serde_json::from_value(value["userIds"].clone()).unwrap();
        prop_assert_eq!(encoded, ids);
    }
}
