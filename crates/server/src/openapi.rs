use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct GreetingDoc {
    pub messages: String,
}

#[derive(ToSchema)]
pub struct BookDoc {
    pub name: String,
    #[schema(example = "fiction")]
    pub genre: String,
    pub price: f64,
    pub book_id: String,
}

#[derive(ToSchema)]
pub struct BookDraftDoc {
    pub name: String,
    #[schema(example = "fiction")]
    pub genre: String,
    pub price: f64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::meta::root,
        crate::routes::meta::hello_world,
        crate::routes::books::list_books,
        crate::routes::books::random_book,
        crate::routes::books::book_by_index,
        crate::routes::books::book_by_id,
        crate::routes::books::add_book,
        crate::routes::books::update_book,
        crate::routes::books::delete_book,
    ),
    components(
        schemas(
            GreetingDoc,
            BookDoc,
            BookDraftDoc,
        )
    ),
    tags(
        (name = "meta"),
        (name = "books")
    )
)]
pub struct ApiDoc;
