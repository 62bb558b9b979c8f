//! Request descriptions, buffered responses, and the authenticated request path.

// crates.io
use http::{
	HeaderMap, HeaderName, HeaderValue, Method, Request, Response, StatusCode,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::ApiClient,
	error::ConfigError,
	http::{ApiTransport, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Replayable description of an outbound API request.
///
/// The description carries an endpoint path rather than a full URL; the client resolves it
/// against its configured base. Keeping the description immutable lets the request path resend
/// it after a token refresh without caller involvement.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	method: Method,
	path: String,
	headers: HeaderMap,
	body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Creates a request description for the provided method and endpoint path.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self { method, path: path.into(), headers: HeaderMap::new(), body: None }
	}

	/// Creates a GET request description.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	/// Creates a POST request description.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	/// Creates a PUT request description.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::PUT, path)
	}

	/// Creates a DELETE request description.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::DELETE, path)
	}

	/// Adds a header to the request.
	pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Attaches a JSON payload, setting the content type accordingly.
	pub fn json<T>(mut self, payload: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		let body = serde_json::to_vec(payload)
			.map_err(|source| ConfigError::SerializePayload { source })?;

		self.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		self.body = Some(body);

		Ok(self)
	}

	/// Attaches a raw body without touching the content type.
	pub fn body(mut self, bytes: Vec<u8>) -> Self {
		self.body = Some(bytes);

		self
	}

	/// Returns the endpoint path this request targets.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Builds the wire request, attaching the bearer token when one is provided.
	pub(crate) fn to_http(
		&self,
		url: Url,
		bearer: Option<&TokenSecret>,
	) -> Result<Request<Vec<u8>>, ConfigError> {
		let mut builder = Request::builder().method(self.method.clone()).uri(url.as_str());

		for (name, value) in &self.headers {
			builder = builder.header(name, value);
		}
		if let Some(token) = bearer {
			let mut value = HeaderValue::try_from(format!("Bearer {}", token.expose()))
				.map_err(http::Error::from)?;

			value.set_sensitive(true);
			builder = builder.header(AUTHORIZATION, value);
		}

		Ok(builder.body(self.body.clone().unwrap_or_default())?)
	}
}

/// Buffered API response with JSON decoding helpers.
#[derive(Clone)]
pub struct ApiResponse {
	status: StatusCode,
	headers: HeaderMap,
	body: Vec<u8>,
}
impl ApiResponse {
	pub(crate) fn from_http(response: Response<Vec<u8>>) -> Self {
		let (parts, body) = response.into_parts();

		Self { status: parts.status, headers: parts.headers, body }
	}

	/// Returns the HTTP status code.
	pub fn status(&self) -> StatusCode {
		self.status
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Returns the response headers.
	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	/// Returns the raw response body.
	pub fn body(&self) -> &[u8] {
		&self.body
	}

	/// Consumes the response and returns the raw body.
	pub fn into_body(self) -> Vec<u8> {
		self.body
	}

	/// Returns the body decoded lossily as text.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Decodes the body as JSON into the requested type.
	pub fn json<T>(&self) -> Result<T>
	where
		T: serde::de::DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::ResponseParse { source, status: Some(self.status.as_u16()) })
	}
}
impl Debug for ApiResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiResponse")
			.field("status", &self.status)
			.field("body_len", &self.body.len())
			.finish()
	}
}

impl<C, M> ApiClient<C, M>
where
	C: ?Sized + ApiTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Issues an authenticated request, refreshing the session once if the API rejects the
	/// current token.
	///
	/// The stored access token is attached as a bearer header when present. A 401/403 response
	/// routes through the single-flight refresh gate: the first rejected request performs the
	/// refresh while later ones park behind it, and every parked request replays with the one
	/// newly issued token. A request that is rejected again after its replay is returned as a
	/// normal failed response; no second refresh is attempted for it.
	pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse> {
		const KIND: FlowKind = FlowKind::Request;

		let span = FlowSpan::new(KIND, "request");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let observed_epoch = self.refresh_gate.epoch();
				let bearer = self.access_token()?;
				let response = self.dispatch(&request, bearer.as_ref()).await?;

				if !is_auth_failure(response.status()) {
					return Ok(response);
				}

				let token = self.join_refresh(observed_epoch).await?;

				self.dispatch(&request, Some(&token)).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	pub(crate) async fn dispatch(
		&self,
		request: &ApiRequest,
		bearer: Option<&TokenSecret>,
	) -> Result<ApiResponse> {
		let url = self.config.endpoint(request.path())?;
		let wire_request = request.to_http(url, bearer)?;
		let response = self
			.transport
			.execute(wire_request)
			.await
			.map_err(|e| self.transport_mapper.map_transport_error(e))?;

		Ok(ApiResponse::from_http(response))
	}
}

pub(crate) fn is_auth_failure(status: StatusCode) -> bool {
	matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}
