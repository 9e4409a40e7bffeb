use notion_storefront::config::FieldNames;
use notion_storefront::mapper::RecordMapper;
use notion_storefront::notion::Page;
use serde_json::{json, Value};

fn page(properties: Value) -> Page {
    serde_json::from_value(json!({
        "object": "page",
        "id": "5c6a8a52-1d7e-4d83-9a2b-0f3c9e7b1a10",
        "created_time": "2024-01-05T03:00:00.000Z",
        "last_edited_time": "2024-08-19T14:22:00.000Z",
        "archived": false,
        "properties": properties
    }))
    .unwrap()
}

fn mapper() -> RecordMapper {
    RecordMapper::new(&FieldNames::default(), "Other")
}

#[test]
fn test_rich_text_name_and_code() {
    let product = mapper().map(&page(json!({
        "Tên sản phẩm": {"id": "a", "type": "rich_text", "rich_text": [
            {"type": "text", "text": {"content": "Son"}, "plain_text": "Son"},
            {"type": "text", "text": {"content": "lì"}, "plain_text": "lì"}
        ]},
        "Mã sản phẩm": {"id": "b", "type": "rich_text", "rich_text": [{"plain_text": "  SL-22  "}]}
    })));

    assert_eq!(product.name, "Son lì");
    assert_eq!(product.code, "SL-22");
}

#[test]
fn test_links_written_as_text() {
    let product = mapper().map(&page(json!({
        "Link shopee": {"type": "rich_text", "rich_text": [{"plain_text": "Shopee: https://s.shopee.vn/abc123, giảm 10%"}]},
        "Link TikTok": {"type": "rich_text", "rich_text": [{"plain_text": "(https://vt.tiktok.com/ZS8x/);"}]}
    })));

    assert_eq!(product.links.shopee, "https://s.shopee.vn/abc123");
    assert_eq!(product.links.tiktok, "https://vt.tiktok.com/ZS8x/");
}

#[test]
fn test_image_text_wins_over_attachments() {
    // a rich_text column can only carry text, so the attachment tier is never consulted
    let text = mapper().map(&page(json!({
        "Images": {"type": "rich_text", "rich_text": [{"plain_text": "https://cdn.example/1.jpg https://cdn.example/2.jpg"}]}
    })));
    assert_eq!(text.images, vec!["https://cdn.example/1.jpg", "https://cdn.example/2.jpg"]);

    let files = mapper().map(&page(json!({
        "Images": {"type": "files", "files": [
            {"name": "front.jpg", "type": "file", "file": {"url": "https://prod-files.example/front.jpg", "expiry_time": "2024-08-19T15:22:00.000Z"}},
            {"name": "back.jpg", "type": "external", "external": {"url": "https://cdn.example/back.jpg"}}
        ]}
    })));
    assert_eq!(
        files.images,
        vec!["https://prod-files.example/front.jpg", "https://cdn.example/back.jpg"]
    );
}

#[test]
fn test_single_rich_text_category_is_not_split() {
    let product = mapper().map(&page(json!({
        "Categorie": {"type": "rich_text", "rich_text": [{"plain_text": "Skincare, Makeup"}]}
    })));
    assert_eq!(product.categories, vec!["Skincare, Makeup"]);
}

#[test]
fn test_category_invariant_holds_for_odd_rows() {
    let rows = vec![
        json!({}),
        json!({"Categorie": {"type": "select", "select": null}}),
        json!({"Categorie": {"type": "multi_select", "multi_select": [{"name": ""}]}}),
        json!({"Categorie": {"type": "rich_text", "rich_text": [{"plain_text": "   "}]}}),
        json!({"Categorie": {"type": "status", "status": {"name": "Done"}}}),
        json!({"Categorie": null}),
    ];

    for properties in rows {
        let product = mapper().map(&page(properties.clone()));
        assert_eq!(product.categories, vec!["Other"], "row: {}", properties);
    }
}

#[test]
fn test_identity_fields_copied_verbatim() {
    let product = mapper().map(&page(json!({})));
    assert_eq!(product.id, "5c6a8a52-1d7e-4d83-9a2b-0f3c9e7b1a10");
    assert_eq!(product.last_edited, "2024-08-19T14:22:00.000Z");
}
