//! 应用层
//!
//! 每种消息一个处理器，启动时注册到 Command/Query Bus

pub mod categories;
pub mod health;
pub mod tags;
pub mod todos;

use std::sync::Arc;

use sqlx::PgPool;
use taskboard_cqrs_core::{
    Command, CommandBusBuilder, LoggingMiddleware, MetricsMiddleware, Query, QueryBusBuilder,
    RegistryCommandBus, RegistryQueryBus,
};
use taskboard_domain_core::Entity;
use taskboard_errors::{AppError, AppResult};
use taskboard_ports::{EntityStore, SoftDeleteStore};

use crate::domain::{Category, Tag, Todo};
use crate::infrastructure::persistence::{
    InMemoryStore, PostgresCategoryRepository, PostgresTagRepository, PostgresTodoRepository,
};
use categories::*;
use health::{GetHealthHandler, GetHealthQuery};
use tags::*;
use todos::*;

/// 服务启动时必须有处理器的全部 Command
pub const COMMANDS: &[&str] = &[
    CreateTodoCommand::NAME,
    UpdateTodoCommand::NAME,
    DeleteTodoCommand::NAME,
    CreateTagCommand::NAME,
    UpdateTagCommand::NAME,
    DeleteTagCommand::NAME,
    CreateCategoryCommand::NAME,
    UpdateCategoryCommand::NAME,
    DeleteCategoryCommand::NAME,
];

/// 服务启动时必须有处理器的全部 Query
pub const QUERIES: &[&str] = &[
    GetTodosQuery::NAME,
    GetTodoByIdQuery::NAME,
    GetTagsQuery::NAME,
    GetTagByIdQuery::NAME,
    GetCategoriesQuery::NAME,
    GetCategoryByIdQuery::NAME,
    GetHealthQuery::NAME,
];

pub(crate) fn not_found<E: Entity>(id: E::Id) -> AppError {
    AppError::not_found(format!("{} with id {} not found", E::NAME, id))
}

/// 各实体的存储
#[derive(Clone)]
pub struct Stores {
    pub todos: Arc<dyn EntityStore<Todo>>,
    pub tags: Arc<dyn SoftDeleteStore<Tag>>,
    pub categories: Arc<dyn SoftDeleteStore<Category>>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            todos: Arc::new(PostgresTodoRepository::new(pool.clone())),
            tags: Arc::new(PostgresTagRepository::new(pool.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            todos: Arc::new(InMemoryStore::<Todo>::new()),
            tags: Arc::new(InMemoryStore::<Tag>::new()),
            categories: Arc::new(InMemoryStore::<Category>::new()),
        }
    }
}

/// 注册全部处理器并构建两条 Bus
///
/// 重复注册返回 `DuplicateHandler`，构建后校验每条消息都有处理器
pub fn build_buses(stores: Stores) -> AppResult<(RegistryCommandBus, RegistryQueryBus)> {
    let mut commands = CommandBusBuilder::new();
    commands
        .middleware(Arc::new(LoggingMiddleware))
        .middleware(Arc::new(MetricsMiddleware));

    commands
        .register::<CreateTodoCommand, _>(CreateTodoHandler::new(stores.todos.clone()))?
        .register::<UpdateTodoCommand, _>(UpdateTodoHandler::new(stores.todos.clone()))?
        .register::<DeleteTodoCommand, _>(DeleteTodoHandler::new(stores.todos.clone()))?
        .register::<CreateTagCommand, _>(CreateTagHandler::new(stores.tags.clone()))?
        .register::<UpdateTagCommand, _>(UpdateTagHandler::new(stores.tags.clone()))?
        .register::<DeleteTagCommand, _>(DeleteTagHandler::new(stores.tags.clone()))?
        .register::<CreateCategoryCommand, _>(CreateCategoryHandler::new(
            stores.categories.clone(),
        ))?
        .register::<UpdateCategoryCommand, _>(UpdateCategoryHandler::new(
            stores.categories.clone(),
        ))?
        .register::<DeleteCategoryCommand, _>(DeleteCategoryHandler::new(
            stores.categories.clone(),
        ))?;

    let mut queries = QueryBusBuilder::new();
    queries
        .middleware(Arc::new(LoggingMiddleware))
        .middleware(Arc::new(MetricsMiddleware));

    queries
        .register::<GetTodosQuery, _>(GetTodosHandler::new(stores.todos.clone()))?
        .register::<GetTodoByIdQuery, _>(GetTodoByIdHandler::new(stores.todos))?
        .register::<GetTagsQuery, _>(GetTagsHandler::new(stores.tags.clone()))?
        .register::<GetTagByIdQuery, _>(GetTagByIdHandler::new(stores.tags))?
        .register::<GetCategoriesQuery, _>(GetCategoriesHandler::new(stores.categories.clone()))?
        .register::<GetCategoryByIdQuery, _>(GetCategoryByIdHandler::new(stores.categories))?
        .register::<GetHealthQuery, _>(GetHealthHandler::new("Taskboard API is running"))?;

    let commands = commands.build();
    let queries = queries.build();

    commands.ensure_handles(COMMANDS)?;
    queries.ensure_handles(QUERIES)?;

    tracing::info!(
        commands = commands.registered().len(),
        queries = queries.registered().len(),
        "Message buses ready"
    );

    Ok((commands, queries))
}
