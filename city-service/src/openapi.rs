use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::models::{CityView, TimeOnly};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_cities,
        handlers::search_cities,
        handlers::get_city,
        handlers::get_city_by_name,
        handlers::cities_by_country,
        handlers::cities_by_timezone,
        handlers::get_time,
    ),
    components(schemas(
        CityView,
        TimeOnly,
    )),
    tags(
        (name = "cities", description = "City catalog and time endpoints"),
    ),
)]
struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
