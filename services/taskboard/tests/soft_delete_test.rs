//! Tag / Category 软删除测试

use std::sync::Arc;

use taskboard::application::categories::*;
use taskboard::application::tags::*;
use taskboard::domain::{Category, Tag, TagPatch};
use taskboard::infrastructure::persistence::InMemoryStore;
use taskboard_common::Patch;
use taskboard_cqrs_core::{CommandHandler, QueryHandler};
use taskboard_errors::AppError;
use taskboard_ports::{EntityStore, SoftDeleteStore};

#[tokio::test]
async fn test_soft_deleted_tag_is_hidden_but_retained() {
    let store: Arc<dyn SoftDeleteStore<Tag>> = Arc::new(InMemoryStore::<Tag>::new());

    let kept = CreateTagHandler::new(store.clone())
        .handle(CreateTagCommand {
            name: "home".to_string(),
            color: Some("#00FF00".to_string()),
        })
        .await
        .unwrap();
    let removed = CreateTagHandler::new(store.clone())
        .handle(CreateTagCommand {
            name: "work".to_string(),
            color: None,
        })
        .await
        .unwrap();

    DeleteTagHandler::new(store.clone())
        .handle(DeleteTagCommand { id: removed.id })
        .await
        .unwrap();

    let tags = GetTagsHandler::new(store.clone())
        .handle(GetTagsQuery)
        .await
        .unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].id, kept.id);

    let err = GetTagByIdHandler::new(store.clone())
        .handle(GetTagByIdQuery { id: removed.id })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let retained = store.find_with_deleted(removed.id).await.unwrap().unwrap();
    assert_eq!(retained.name, "work");
    assert!(retained.deleted_at.is_some());
}

#[tokio::test]
async fn test_deleting_a_tag_twice_is_not_found() {
    let store: Arc<dyn SoftDeleteStore<Tag>> = Arc::new(InMemoryStore::<Tag>::new());
    let tag = CreateTagHandler::new(store.clone())
        .handle(CreateTagCommand {
            name: "errands".to_string(),
            color: None,
        })
        .await
        .unwrap();

    let delete = DeleteTagHandler::new(store.clone());
    delete
        .handle(DeleteTagCommand { id: tag.id })
        .await
        .unwrap();
    let err = delete
        .handle(DeleteTagCommand { id: tag.id })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), format!("Not found: Tag with id {} not found", tag.id));
}

#[tokio::test]
async fn test_update_soft_deleted_tag_is_not_found() {
    let store: Arc<dyn SoftDeleteStore<Tag>> = Arc::new(InMemoryStore::<Tag>::new());
    let tag = store
        .insert(taskboard::domain::NewTag {
            name: "old".to_string(),
            color: None,
        })
        .await
        .unwrap();
    store.soft_delete(&tag).await.unwrap();

    let err = UpdateTagHandler::new(store.clone())
        .handle(UpdateTagCommand {
            id: tag.id,
            patch: TagPatch {
                name: Patch::Set("new".to_string()),
                ..Default::default()
            },
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    let retained = store.find_with_deleted(tag.id).await.unwrap().unwrap();
    assert_eq!(retained.name, "old");
}

#[tokio::test]
async fn test_soft_deleted_category_is_hidden_but_retained() {
    let store: Arc<dyn SoftDeleteStore<Category>> = Arc::new(InMemoryStore::<Category>::new());

    let category = CreateCategoryHandler::new(store.clone())
        .handle(CreateCategoryCommand {
            name: "Groceries".to_string(),
            description: Some("Food and household".to_string()),
        })
        .await
        .unwrap();

    DeleteCategoryHandler::new(store.clone())
        .handle(DeleteCategoryCommand { id: category.id })
        .await
        .unwrap();

    let categories = GetCategoriesHandler::new(store.clone())
        .handle(GetCategoriesQuery)
        .await
        .unwrap();
    assert!(categories.is_empty());

    let err = GetCategoryByIdHandler::new(store.clone())
        .handle(GetCategoryByIdQuery { id: category.id })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let retained = store.find_with_deleted(category.id).await.unwrap().unwrap();
    assert_eq!(retained.description.as_deref(), Some("Food and household"));
    assert!(retained.deleted_at.is_some());
}

#[tokio::test]
async fn test_update_category_description() {
    let store: Arc<dyn SoftDeleteStore<Category>> = Arc::new(InMemoryStore::<Category>::new());
    let category = CreateCategoryHandler::new(store.clone())
        .handle(CreateCategoryCommand {
            name: "Work".to_string(),
            description: None,
        })
        .await
        .unwrap();

    let updated = UpdateCategoryHandler::new(store)
        .handle(UpdateCategoryCommand {
            id: category.id,
            patch: taskboard::domain::CategoryPatch {
                description: Patch::Set("Office tasks".to_string()),
                ..Default::default()
            },
        })
        .await
        .unwrap();

    assert_eq!(updated.name, "Work");
    assert_eq!(updated.description.as_deref(), Some("Office tasks"));
}
