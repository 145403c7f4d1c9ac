use std::sync::Arc;

use actix_web::{get, post, web::Data as State, web::Path};
use utoipa_actix_web::service_config::ServiceConfig;

use crate::api::dto::hotel::{HotelView, SearchDTO};
use crate::api::error::ApiResult;
use crate::api::middlewares::context::RequestContext;
use crate::api::middlewares::validate::Form;
use crate::api::views::View;
use crate::domain::error::AppError;
use crate::domain::services::hotel::HotelService;

pub fn routes(cfg: &mut ServiceConfig) {
    cfg.service(home)
        .service(all_hotels)
        .service(hotel_detail)
        .service(all_countries)
        .service(hotels_by_country)
        .service(search_results);
}

#[utoipa::path(
    responses(
        (status = 200, description = "View `index` with up to six random available hotels and countries"),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    tag = "Hotels",
)]
#[get("/")]
pub async fn home(ctx: RequestContext, hotel_service: State<Arc<dyn HotelService>>) -> ApiResult {
    let filters = hotel_service.home_filters().await?;

    View::new("index", "Lets Travel")
        .with("hotels", &HotelView::list(&filters.hotels))?
        .with("countries", &filters.countries)?
        .render(&ctx)
}

#[utoipa::path(
    responses(
        (status = 200, body = [HotelView], description = "View `all_hotels` with every available hotel"),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    tag = "Hotels",
)]
#[get("/all")]
pub async fn all_hotels(
    ctx: RequestContext,
    hotel_service: State<Arc<dyn HotelService>>,
) -> ApiResult {
    let hotels = hotel_service.available().await?;

    View::new("all_hotels", "All Hotels")
        .with("hotels", &HotelView::list(&hotels))?
        .render(&ctx)
}

#[utoipa::path(
    params(("hotel" = String, Path, description = "Hotel id")),
    responses(
        (status = 200, body = [HotelView], description = "View `hotel_detail` with zero or one hotel"),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    tag = "Hotels",
)]
#[get("/all/{hotel}/details")]
pub async fn hotel_detail(
    ctx: RequestContext,
    hotel: Path<String>,
    hotel_service: State<Arc<dyn HotelService>>,
) -> ApiResult {
    let hotel = hotel_service.detail(&hotel).await?;

    View::new("hotel_detail", "Lets Travel - Hotel Details")
        .with("hotels", &HotelView::list(&hotel))?
        .render(&ctx)
}

#[utoipa::path(
    responses(
        (status = 200, body = [String], description = "View `all_countries` with the sorted distinct countries"),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    tag = "Hotels",
)]
#[get("/countries")]
pub async fn all_countries(
    ctx: RequestContext,
    hotel_service: State<Arc<dyn HotelService>>,
) -> ApiResult {
    let countries = hotel_service.countries().await?;

    View::new("all_countries", "Browse by Country")
        .with("countries", &countries)?
        .render(&ctx)
}

#[utoipa::path(
    params(("country" = String, Path, description = "Exact country name")),
    responses(
        (status = 200, body = [HotelView], description = "View `hotels_by_country`, availability not filtered"),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    tag = "Hotels",
)]
#[get("/countries/{country}")]
pub async fn hotels_by_country(
    ctx: RequestContext,
    country: Path<String>,
    hotel_service: State<Arc<dyn HotelService>>,
) -> ApiResult {
    let hotels = hotel_service.by_country(&country).await?;

    View::new("hotels_by_country", format!("Browse by Country: {country}"))
        .with("hotels", &HotelView::list(&hotels))?
        .render(&ctx)
}

#[utoipa::path(
    request_body(content = SearchDTO, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, body = [HotelView], description = "View `search_results` echoing the query"),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 422, body = AppError, example = json!(AppError::example_422())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    tag = "Hotels",
)]
#[post("/results")]
pub async fn search_results(
    ctx: RequestContext,
    payload: Form<SearchDTO>,
    hotel_service: State<Arc<dyn HotelService>>,
) -> ApiResult {
    let search = payload.into_inner();

    let hotels = hotel_service.search(search.query()).await?;

    View::new("search_results", "Search results")
        .with("query", &search)?
        .with("hotels", &HotelView::list(&hotels))?
        .render(&ctx)
}
