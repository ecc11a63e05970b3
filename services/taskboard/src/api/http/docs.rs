//! OpenAPI 文档，挂载在 `/api/docs`

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::{DeletedResponse, categories, tags, todos};
use crate::application::health::HealthReport;
use crate::domain::{Category, CategoryId, Priority, Tag, TagId, Todo, TodoId};

pub const DOCS_PATH: &str = "/api/docs";
pub const OPENAPI_PATH: &str = "/api/docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Taskboard API", description = "Todo, Tag and Category CRUD over CQRS buses"),
    paths(
        super::health,
        todos::list_todos,
        todos::get_todo,
        todos::create_todo,
        todos::update_todo,
        todos::delete_todo,
        tags::list_tags,
        tags::get_tag,
        tags::create_tag,
        tags::update_tag,
        tags::delete_tag,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
    ),
    components(schemas(
        Todo,
        TodoId,
        Priority,
        Tag,
        TagId,
        Category,
        CategoryId,
        HealthReport,
        DeletedResponse,
        todos::CreateTodoRequest,
        todos::UpdateTodoRequest,
        tags::CreateTagRequest,
        tags::UpdateTagRequest,
        categories::CreateCategoryRequest,
        categories::UpdateCategoryRequest,
    )),
    tags(
        (name = "health", description = "API status"),
        (name = "todos", description = "Todo operations"),
        (name = "tags", description = "Tag operations"),
        (name = "categories", description = "Category operations"),
    )
)]
pub struct ApiDoc;

/// Swagger UI 与 OpenAPI JSON
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/api/health",
            "/api/todos",
            "/api/todos/{id}",
            "/api/tags",
            "/api/tags/{id}",
            "/api/categories",
            "/api/categories/{id}",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
    }

    #[test]
    fn test_schemas_are_registered() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;

        for name in ["Todo", "Priority", "Tag", "Category", "UpdateTodoRequest"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
