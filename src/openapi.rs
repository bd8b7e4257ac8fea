//! OpenAPI document and Swagger UI mount.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Warehouse Inventory API",
        version = "0.1.0",
        description = "Warehouse inventory dashboard API: item lookup, inventory mutations, and utilization statistics backed by a document store."
    ),
    paths(
        crate::handlers::items::get_item,
        crate::handlers::items::add_item,
        crate::handlers::items::delete_item,
        crate::handlers::stats::warehouse_stats,
    ),
    components(schemas(
        crate::errors::ErrorResponse,
        crate::handlers::items::ItemLookupRequest,
        crate::handlers::items::DeleteItemRequest,
        crate::services::inventory::AddItemRequest,
        crate::services::stats::WarehouseStats,
        crate::services::stats::ZoneStats,
        crate::models::CategoryCount,
    )),
    tags(
        (name = "items", description = "Item lookup and inventory mutations"),
        (name = "stats", description = "Warehouse utilization statistics")
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
