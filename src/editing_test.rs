use super::*;
use crate::store::MemoryStore;
use crate::test_helpers;
use serde_json::json;

async fn cta_setup() -> (MemoryStore, EditContext, ComponentInstance, NewInstance) {
    let (store, org, home) = test_helpers::acme_store().await;
    let mut cta = test_helpers::definition("cta_section", json!({"ctaLink": "/contact"}), false);
    cta.required_fields = vec!["headline".into(), "ctaLink".into()];
    let placed = test_helpers::place(&store, &home, &cta, "cta", 1, json!({"headline": "Fly"})).await;

    let input = NewInstance {
        organization_id: org.id,
        page_id: home.id,
        component_key: "cta_section".into(),
        instance_key: "cta-2".into(),
        configuration: json!({"headline": "Charter"}),
        display_order: 2,
    };
    let ctx = EditContext::editable(Arc::new(store.clone()));
    (store, ctx, placed, input)
}

#[tokio::test]
async fn read_only_context_rejects_writes() {
    let (_, _, placed, input) = cta_setup().await;
    let ctx = EditContext::read_only();
    assert!(!ctx.is_editable());
    assert!(matches!(ctx.mutate(placed.id, json!({})).await, Err(EditError::NotEditable)));
    assert!(matches!(ctx.create(input).await, Err(EditError::NotEditable)));
}

#[tokio::test]
async fn mutate_validates_then_replaces() {
    let (store, ctx, placed, _) = cta_setup().await;

    let err = ctx.mutate(placed.id, json!({"headline": ""})).await.unwrap_err();
    match err {
        EditError::Validation(report) => {
            assert_eq!(report.errors, ["Required field 'headline' is missing"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    let unchanged = store.placed_instance(placed.id).await.unwrap().unwrap();
    assert_eq!(unchanged.instance.configuration, json!({"headline": "Fly"}));

    let updated = ctx.mutate(placed.id, json!({"headline": "Depart"})).await.unwrap();
    assert_eq!(updated.configuration, json!({"headline": "Depart"}));
}

#[tokio::test]
async fn mutate_rejects_non_object_configuration() {
    let (_, ctx, placed, _) = cta_setup().await;
    let err = ctx.mutate(placed.id, json!(["headline"])).await.unwrap_err();
    assert_eq!(err.error_code(), "E_VALIDATION");
}

#[tokio::test]
async fn mutate_unknown_instance() {
    let (_, ctx, _, _) = cta_setup().await;
    assert!(matches!(ctx.mutate(Uuid::new_v4(), json!({})).await, Err(EditError::InstanceNotFound(_))));
}

#[tokio::test]
async fn create_validates_merged_configuration() {
    let (_, ctx, _, input) = cta_setup().await;

    let missing = NewInstance { configuration: json!({}), ..input.clone() };
    assert!(matches!(ctx.create(missing).await, Err(EditError::Validation(_))));

    let created = ctx.create(input.clone()).await.unwrap();
    assert_eq!(created.configuration, json!({"headline": "Charter", "ctaLink": "/contact"}));

    let dup = ctx.create(input).await.unwrap_err();
    assert_eq!(dup.error_code(), "E_DUPLICATE_INSTANCE_KEY");
}

#[tokio::test]
async fn create_unknown_definition() {
    let (_, ctx, _, input) = cta_setup().await;
    let unknown = NewInstance { component_key: "carousel".into(), ..input };
    assert!(matches!(ctx.create(unknown).await, Err(EditError::DefinitionNotFound(key)) if key == "carousel"));
}
