//! Todo 处理器测试

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use taskboard::application::todos::*;
use taskboard::application::{Stores, build_buses};
use taskboard::domain::{NewTodo, Priority, Todo, TodoFilter, TodoId, TodoPatch};
use taskboard::infrastructure::persistence::InMemoryStore;
use taskboard_common::Patch;
use taskboard_cqrs_core::{CommandBus, CommandHandler, QueryBus, QueryHandler};
use taskboard_errors::{AppError, AppResult};
use taskboard_ports::EntityStore;

mock! {
    TodoStore {}

    #[async_trait]
    impl EntityStore<Todo> for TodoStore {
        async fn find(&self, id: TodoId) -> AppResult<Option<Todo>>;
        async fn find_all(&self, filter: &TodoFilter) -> AppResult<Vec<Todo>>;
        async fn insert(&self, draft: NewTodo) -> AppResult<Todo>;
        async fn save(&self, entity: &Todo) -> AppResult<Todo>;
        async fn remove(&self, entity: &Todo) -> AppResult<()>;
    }
}

fn memory_store() -> Arc<dyn EntityStore<Todo>> {
    Arc::new(InMemoryStore::<Todo>::new())
}

fn create(title: &str, priority: Option<Priority>) -> CreateTodoCommand {
    CreateTodoCommand {
        title: title.to_string(),
        description: None,
        priority,
    }
}

#[tokio::test]
async fn test_create_todo_defaults() {
    let handler = CreateTodoHandler::new(memory_store());

    let todo = handler.handle(create("Buy milk", None)).await.unwrap();

    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.description, None);
    assert!(!todo.completed);
    assert_eq!(todo.priority, Priority::Low);
    assert!(todo.id.0 > 0);
    assert_eq!(todo.created_at, todo.updated_at);
}

#[tokio::test]
async fn test_create_todo_keeps_given_priority() {
    let handler = CreateTodoHandler::new(memory_store());

    let todo = handler
        .handle(create("Ship release", Some(Priority::High)))
        .await
        .unwrap();

    assert_eq!(todo.priority, Priority::High);
}

#[tokio::test]
async fn test_update_missing_todo_performs_no_write() {
    let mut store = MockTodoStore::new();
    store
        .expect_find()
        .withf(|id| *id == TodoId(99))
        .once()
        .returning(|_| Ok(None));
    store.expect_save().never();

    let handler = UpdateTodoHandler::new(Arc::new(store));
    let err = handler
        .handle(UpdateTodoCommand {
            id: TodoId(99),
            patch: TodoPatch {
                title: Patch::Set("Renamed".to_string()),
                ..Default::default()
            },
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.to_string(), "Not found: Todo with id 99 not found");
}

#[tokio::test]
async fn test_delete_missing_todo_performs_no_write() {
    let mut store = MockTodoStore::new();
    store.expect_find().once().returning(|_| Ok(None));
    store.expect_remove().never();

    let handler = DeleteTodoHandler::new(Arc::new(store));
    let err = handler
        .handle(DeleteTodoCommand { id: TodoId(7) })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_partial_update_changes_only_given_fields() {
    let store = memory_store();
    let created = CreateTodoHandler::new(store.clone())
        .handle(CreateTodoCommand {
            title: "Buy milk".to_string(),
            description: Some("two litres".to_string()),
            priority: Some(Priority::Medium),
        })
        .await
        .unwrap();

    let update = UpdateTodoCommand {
        id: created.id,
        patch: TodoPatch {
            completed: Patch::Set(true),
            ..Default::default()
        },
    };
    let handler = UpdateTodoHandler::new(store.clone());

    let once = handler.handle(update.clone()).await.unwrap();
    let twice = handler.handle(update).await.unwrap();

    assert!(once.completed);
    assert_eq!(once.title, "Buy milk");
    assert_eq!(once.description.as_deref(), Some("two litres"));
    assert_eq!(once.priority, Priority::Medium);

    assert_eq!(twice.title, once.title);
    assert_eq!(twice.description, once.description);
    assert_eq!(twice.completed, once.completed);
    assert_eq!(twice.priority, once.priority);
    assert!(twice.updated_at >= once.updated_at);
}

#[tokio::test]
async fn test_update_clears_description() {
    let store = memory_store();
    let created = CreateTodoHandler::new(store.clone())
        .handle(CreateTodoCommand {
            title: "Water plants".to_string(),
            description: Some("balcony".to_string()),
            priority: None,
        })
        .await
        .unwrap();

    let updated = UpdateTodoHandler::new(store)
        .handle(UpdateTodoCommand {
            id: created.id,
            patch: TodoPatch {
                description: Patch::Clear,
                ..Default::default()
            },
        })
        .await
        .unwrap();

    assert_eq!(updated.description, None);
    assert_eq!(updated.title, "Water plants");
}

#[tokio::test]
async fn test_hard_delete_then_get_is_not_found() {
    let store = memory_store();
    let created = CreateTodoHandler::new(store.clone())
        .handle(create("Temporary", None))
        .await
        .unwrap();

    DeleteTodoHandler::new(store.clone())
        .handle(DeleteTodoCommand { id: created.id })
        .await
        .unwrap();

    let err = GetTodoByIdHandler::new(store.clone())
        .handle(GetTodoByIdQuery { id: created.id })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(store.find(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_filters_by_completed() {
    let store = memory_store();
    let create_handler = CreateTodoHandler::new(store.clone());
    let open = create_handler.handle(create("Open", None)).await.unwrap();
    let done = create_handler.handle(create("Done", None)).await.unwrap();

    UpdateTodoHandler::new(store.clone())
        .handle(UpdateTodoCommand {
            id: done.id,
            patch: TodoPatch {
                completed: Patch::Set(true),
                ..Default::default()
            },
        })
        .await
        .unwrap();

    let list = GetTodosHandler::new(store.clone());

    let completed = list
        .handle(GetTodosQuery {
            completed: Some(true),
        })
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, done.id);

    let all = list.handle(GetTodosQuery::default()).await.unwrap();
    let ids: Vec<_> = all.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![done.id, open.id]);

    let none = list
        .handle(GetTodosQuery {
            completed: Some(false),
        })
        .await
        .unwrap();
    assert_eq!(none.len(), 1);
    assert_eq!(none[0].id, open.id);
}

#[tokio::test]
async fn test_list_empty_store_is_not_an_error() {
    let todos = GetTodosHandler::new(memory_store())
        .handle(GetTodosQuery {
            completed: Some(true),
        })
        .await
        .unwrap();
    assert!(todos.is_empty());
}

#[tokio::test]
async fn test_dispatch_through_buses() {
    let (commands, queries) = build_buses(Stores::in_memory()).unwrap();

    let created = commands
        .dispatch(create("Buy milk", None))
        .await
        .unwrap();
    let fetched = queries
        .dispatch(GetTodoByIdQuery { id: created.id })
        .await
        .unwrap();

    assert_eq!(fetched, created);

    let err = queries
        .dispatch(GetTodoByIdQuery { id: TodoId(404) })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
