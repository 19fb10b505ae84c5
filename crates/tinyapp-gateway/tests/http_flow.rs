use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use tinyapp_gateway::session::{
    PlainCookieSession, SessionAccessor, SignedCookieSession, SESSION_COOKIE,
};
use tinyapp_gateway::{App, Bootstrap};
use tinyapp_shortener::Argon2Hasher;
use tower::ServiceExt;

const BASE_URL: &str = "http://tiny.test";

struct Fixture {
    router: Router,
}

impl Fixture {
    fn with_session(session: Arc<dyn SessionAccessor>, seed_demo: bool) -> Self {
        let state = Bootstrap::builder()
            .public_base_url(BASE_URL)
            .session(session)
            .seed_demo(seed_demo)
            .hasher(Argon2Hasher::with_params(1024, 1, 1).expect("argon2 params"))
            .build()
            .into_state();

        Self {
            router: App::router(state),
        }
    }

    fn signed() -> Self {
        Self::with_session(Arc::new(SignedCookieSession::ephemeral()), false)
    }

    fn plain() -> Self {
        Self::with_session(Arc::new(PlainCookieSession), false)
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("infallible router")
    }

    async fn get(&self, uri: &str, session: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = session {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post(&self, uri: &str, form: &str, session: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded");
        if let Some(cookie) = session {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form.to_owned())).unwrap())
            .await
    }

    /// Registers an account and returns the `Cookie` header value for it.
    async fn register(&self, email: &str, password: &str) -> String {
        let form = format!("email={}&password={password}", email.replace('@', "%40"));
        let response = self.post("/register", &form, None).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/urls");
        session_cookie(&response).expect("session cookie")
    }

    /// Shortens `target` and returns the new alias.
    async fn shorten(&self, target: &str, session: &str) -> String {
        let response = self
            .post("/urls", &format!("longURL={target}"), Some(session))
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        location(&response)
            .strip_prefix("/urls/")
            .expect("redirect to the new link")
            .to_owned()
    }
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("location header")
        .to_str()
        .unwrap()
}

fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&format!("{SESSION_COOKIE}=")))
        .and_then(|value| value.split(';').next())
        .map(str::to_owned)
}

async fn json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health() {
    let fixture = Fixture::signed();

    let response = fixture.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["status"], "ok");
}

#[tokio::test]
async fn link_lifecycle() {
    let fixture = Fixture::signed();
    let session = fixture.register("a@x.com", "pw").await;

    let alias = fixture.shorten("www.example.com", &session).await;
    assert_eq!(alias.len(), 6);

    let response = fixture.get(&format!("/urls/{alias}"), Some(&session)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let view = json(response).await;
    assert_eq!(view["user"]["email"], "a@x.com");
    assert_eq!(view["url"]["long_url"], "http://www.example.com");
    assert_eq!(view["url"]["short_url"], format!("{BASE_URL}/u/{alias}"));
    assert_eq!(view["url"]["total_visits"], 0);

    let response = fixture
        .post(
            &format!("/urls/{alias}"),
            "longURL=https://example.org",
            Some(&session),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/urls");

    let response = fixture.get("/urls", Some(&session)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let index = json(response).await;
    let urls = index["urls"].as_array().unwrap();
    assert_eq!(urls.len(), 1);
    assert_eq!(urls[0]["short_code"], alias.as_str());
    assert_eq!(urls[0]["long_url"], "https://example.org");

    let response = fixture
        .post(&format!("/urls/{alias}/delete"), "", Some(&session))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/urls");

    let response = fixture.get(&format!("/urls/{alias}"), Some(&session)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(json(response).await["error"].is_string());

    let response = fixture.get(&format!("/u/{alias}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn redirect_counts_visits() {
    let fixture = Fixture::signed();
    let session = fixture.register("a@x.com", "pw").await;
    let alias = fixture.shorten("www.example.com", &session).await;

    for visitor in ["203.0.113.7", "203.0.113.7, 10.0.0.1", "198.51.100.2"] {
        let request = Request::builder()
            .uri(format!("/u/{alias}"))
            .header("x-forwarded-for", visitor)
            .body(Body::empty())
            .unwrap();
        let response = fixture.send(request).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "http://www.example.com");
    }

    let view = json(fixture.get(&format!("/urls/{alias}"), Some(&session)).await).await;
    assert_eq!(view["url"]["total_visits"], 3);
    assert_eq!(view["url"]["unique_visitors"], 2);
}

#[tokio::test]
async fn access_checks_run_in_order() {
    let fixture = Fixture::signed();
    let owner = fixture.register("owner@x.com", "pw").await;
    let other = fixture.register("other@x.com", "pw").await;
    let alias = fixture.shorten("example.com", &owner).await;

    let missing = fixture.get("/urls/nope00", None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let malformed = fixture.get("/urls/not-an-alias", Some(&owner)).await;
    assert_eq!(malformed.status(), StatusCode::NOT_FOUND);

    let anonymous = fixture.get(&format!("/urls/{alias}"), None).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let forbidden = fixture.get(&format!("/urls/{alias}"), Some(&other)).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let update = fixture
        .post(&format!("/urls/{alias}"), "longURL=evil.com", Some(&other))
        .await;
    assert_eq!(update.status(), StatusCode::FORBIDDEN);

    let delete = fixture
        .post(&format!("/urls/{alias}/delete"), "", Some(&other))
        .await;
    assert_eq!(delete.status(), StatusCode::FORBIDDEN);

    let view = json(fixture.get(&format!("/urls/{alias}"), Some(&owner)).await).await;
    assert_eq!(view["url"]["long_url"], "http://example.com");

    let others_index = json(fixture.get("/urls", Some(&other)).await).await;
    assert!(others_index["urls"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn anonymous_requests() {
    let fixture = Fixture::signed();

    let response = fixture.get("/urls", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = fixture.post("/urls", "longURL=example.com", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = fixture.get("/urls/new", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = fixture.get("/", None).await;
    assert_eq!(location(&response), "/login");

    let response = fixture.get("/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(json(response).await["user"].is_null());
}

#[tokio::test]
async fn logged_in_users_skip_auth_pages() {
    let fixture = Fixture::signed();
    let session = fixture.register("a@x.com", "pw").await;

    for page in ["/", "/login", "/register"] {
        let response = fixture.get(page, Some(&session)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/urls");
    }

    let response = fixture.get("/urls/new", Some(&session)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn registration_errors() {
    let fixture = Fixture::signed();
    fixture.register("a@x.com", "pw").await;

    let empty = fixture.post("/register", "email=&password=pw", None).await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
    assert!(session_cookie(&empty).is_none());

    let missing = fixture.post("/register", "", None).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let taken = fixture
        .post("/register", "email=a%40x.com&password=other", None)
        .await;
    assert_eq!(taken.status(), StatusCode::BAD_REQUEST);
    assert!(session_cookie(&taken).is_none());
}

#[tokio::test]
async fn login_and_logout() {
    let fixture = Fixture::signed();
    fixture.register("a@x.com", "pw").await;

    let response = fixture
        .post("/login", "email=a%40x.com&password=pw", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/urls");
    let session = session_cookie(&response).expect("session cookie");

    assert_eq!(
        fixture.get("/urls", Some(&session)).await.status(),
        StatusCode::OK
    );

    let response = fixture.post("/logout", "", Some(&session)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let cleared = session_cookie(&response).expect("removal cookie");
    assert_eq!(cleared, format!("{SESSION_COOKIE}="));
}

#[tokio::test]
async fn login_failures_look_the_same() {
    let fixture = Fixture::signed();
    fixture.register("a@x.com", "pw").await;

    let wrong_password = fixture
        .post("/login", "email=a%40x.com&password=nope", None)
        .await;
    let unknown_email = fixture
        .post("/login", "email=b%40x.com&password=pw", None)
        .await;

    assert_eq!(wrong_password.status(), StatusCode::FORBIDDEN);
    assert_eq!(unknown_email.status(), StatusCode::FORBIDDEN);
    assert_eq!(json(wrong_password).await, json(unknown_email).await);
}

/// Reads the caller's user id from the `/urls` view.
async fn user_id(fixture: &Fixture, session: &str) -> String {
    let index = json(fixture.get("/urls", Some(session)).await).await;
    index["user"]["id"].as_str().expect("user id").to_owned()
}

#[tokio::test]
async fn unsigned_cookie_is_ignored_in_signed_mode() {
    let fixture = Fixture::signed();
    let session = fixture.register("a@x.com", "pw").await;
    let alias = fixture.shorten("example.com", &session).await;
    let unsigned = format!("{SESSION_COOKIE}={}", user_id(&fixture, &session).await);

    assert_ne!(unsigned, session);

    let response = fixture.get("/urls", Some(&unsigned)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = fixture
        .get(&format!("/urls/{alias}"), Some(&unsigned))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = fixture
        .post("/urls", "longURL=example.org", Some(&unsigned))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unsigned_cookie_is_accepted_in_plain_mode() {
    let fixture = Fixture::plain();
    let session = fixture.register("a@x.com", "pw").await;
    let unsigned = format!("{SESSION_COOKIE}={}", user_id(&fixture, &session).await);

    assert_eq!(unsigned, session);

    let response = fixture.get("/urls", Some(&unsigned)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn control_characters_in_target_are_rejected() {
    let fixture = Fixture::signed();
    let session = fixture.register("a@x.com", "pw").await;

    let response = fixture
        .post("/urls", "longURL=example.com%01x", Some(&session))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let index = json(fixture.get("/urls", Some(&session)).await).await;
    assert!(index["urls"].as_array().unwrap().is_empty());

    let alias = fixture.shorten("example.com", &session).await;
    let response = fixture
        .post(
            &format!("/urls/{alias}"),
            "longURL=example.com%0D%0Ax",
            Some(&session),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = fixture.get(&format!("/u/{alias}"), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "http://example.com");
}

#[tokio::test]
async fn plain_sessions_round_trip() {
    let fixture = Fixture::plain();
    let session = fixture.register("a@x.com", "pw").await;

    assert!(session.starts_with(&format!("{SESSION_COOKIE}=")));
    assert_eq!(
        fixture.get("/urls", Some(&session)).await.status(),
        StatusCode::OK
    );

    // Ids of accounts that do not exist are not authenticated.
    let stale = fixture.get("/urls", Some("user_id=ghost9")).await;
    assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn demo_links_redirect_anonymously() {
    let fixture = Fixture::with_session(Arc::new(SignedCookieSession::ephemeral()), true);

    let response = fixture.get("/u/b2xVn2", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "http://www.lighthouselabs.ca");

    let response = fixture.get("/u/9sm5xK", None).await;
    assert_eq!(location(&response), "http://www.google.com");

    // Anonymous records belong to nobody.
    let session = fixture.register("a@x.com", "pw").await;
    let response = fixture.get("/urls/b2xVn2", Some(&session)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
