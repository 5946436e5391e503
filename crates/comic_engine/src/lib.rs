//! Comic engine: admin page preview, genre API client and background runner.
mod decode;
mod engine;
mod genres;
mod page;
mod preview_page;
mod types;

pub use decode::{decode_text, DecodeError, DecodedText};
pub use engine::EngineHandle;
pub use genres::{
    decode_genres, fetch_genres, genres_endpoint, FetchSettings, GenreClient, ReqwestGenreClient,
    DEFAULT_API_BASE_URL,
};
pub use page::{AdminPage, FileInput, MULTI_FILE_INPUT_SELECTOR};
pub use preview_page::PreviewPage;
pub use types::{EngineEvent, FailureKind, FetchError, Genre, GenreFetch, RequestId};
