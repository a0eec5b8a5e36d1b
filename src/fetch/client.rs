use reqwest::blocking::{Request, Response};

/// Executes a prepared request. Implemented by [`super::BasicClient`].
pub trait HttpClient {
    fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
