//! Users API handlers.
//!
//! ```text
//! GET  /api/users
//! POST /api/users/signup {"name":"..","email":"..","password":"..","image":".."}
//! POST /api/users/login  {"email":"..","password":".."}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{LoginCredentials, SignupDetails, User};

use super::ApiResult;
use super::schemas::{ErrorSchema, MessageResponse, UserSchema};
use super::state::HttpState;
use super::validation::map_user_validation_error;

/// Acknowledgement returned by a successful login.
pub const LOGGED_IN: &str = "Logged in!";

/// Signup request body for `POST /api/users/signup`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SignupRequest {
    #[schema(example = "Carter Moore")]
    pub name: String,
    #[schema(example = "test@test.com")]
    pub email: String,
    #[schema(example = "testers")]
    pub password: String,
    /// Avatar URL; a placeholder is used when absent.
    #[serde(default)]
    pub image: Option<String>,
}

/// Login request body for `POST /api/users/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "test@test.com")]
    pub email: String,
    #[schema(example = "testers")]
    pub password: String,
}

/// Body of `{user}` responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(value_type = UserSchema)]
    pub user: User,
}

/// Body of `{users}` responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UsersResponse {
    #[schema(value_type = Vec<UserSchema>)]
    pub users: Vec<User>,
}

/// List every user, without passwords.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = UsersResponse),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersResponse>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(UsersResponse { users }))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/users/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Created", body = UserResponse),
        (status = 422, description = "Invalid inputs or email taken", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/users/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let SignupRequest {
        name,
        email,
        password,
        image,
    } = payload.into_inner();
    let details = SignupDetails::try_from_parts(&name, &email, &password, image.as_deref())
        .map_err(map_user_validation_error)?;
    let user = state.signup.signup(details).await?;
    Ok(HttpResponse::Created().json(UserResponse { user }))
}

/// Check credentials.
///
/// Unknown email and wrong password produce the same 401.
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::new(&email, &password);
    state.login.login(&credentials).await?;
    Ok(web::Json(MessageResponse::new(LOGGED_IN)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{DUPLICATE_EMAIL, INVALID_CREDENTIALS};
    use crate::domain::{Error, PLACEHOLDER_USER_IMAGE, UserId};
    use crate::inbound::http::configure_api;
    use crate::inbound::http::test_utils::{TestPorts, state_with};
    use crate::inbound::http::validation::INVALID_INPUTS;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use crate::domain::UserAccountService;
    use crate::outbound::memory::MemoryDocumentStore;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::layer::SubscriberExt;

    async fn send(ports: TestPorts, req: actix_test::TestRequest) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(ports))
                .service(web::scope("/api").configure(configure_api)),
        )
        .await;
        let res = actix_test::call_service(&app, req.to_request()).await;
        let status = res.status();
        (status, actix_test::read_body_json(res).await)
    }

    fn signup_request(email: &str) -> actix_test::TestRequest {
        actix_test::TestRequest::post()
            .uri("/api/users/signup")
            .set_json(SignupRequest {
                name: "Carter Moore".into(),
                email: email.into(),
                password: "testers".into(),
                image: None,
            })
    }

    #[actix_web::test]
    async fn list_users_wraps_profiles() {
        let mut ports = TestPorts::default();
        ports.users.expect_list_users().returning(|| {
            let account = SignupDetails::try_from_parts("Carter Moore", "test@test.com", "testers", None)
                .expect("valid signup")
                .into_account(UserId::random());
            Ok(vec![account.profile()])
        });

        let (status, body) = send(ports, actix_test::TestRequest::get().uri("/api/users")).await;

        assert_eq!(status, StatusCode::OK);
        let users = body["users"].as_array().expect("users array");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["email"], "test@test.com");
        assert!(users[0].get("password").is_none());
    }

    #[actix_web::test]
    async fn signup_creates_user_with_placeholder_image() {
        let mut ports = TestPorts::default();
        ports
            .signup
            .expect_signup()
            .withf(|details| details.email().as_ref() == "new@test.com")
            .times(1)
            .returning(|details| Ok(details.into_account(UserId::random()).profile()));

        let (status, body) = send(ports, signup_request("new@test.com")).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["image"], PLACEHOLDER_USER_IMAGE);
        assert_eq!(body["user"]["places"], json!([]));
    }

    #[actix_web::test]
    async fn duplicate_email_is_unprocessable() {
        let mut ports = TestPorts::default();
        ports
            .signup
            .expect_signup()
            .returning(|_| Err(Error::invalid_request(DUPLICATE_EMAIL)));

        let (status, body) = send(ports, signup_request("test@test.com")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], DUPLICATE_EMAIL);
    }

    #[rstest]
    #[case::empty_name(json!({"name": " ", "email": "a@b.co", "password": "secret"}), "name")]
    #[case::bad_email(json!({"name": "A", "email": "not-an-email", "password": "secret"}), "email")]
    #[case::short_password(json!({"name": "A", "email": "a@b.co", "password": "12345"}), "password")]
    #[actix_web::test]
    async fn signup_validates_inputs(#[case] payload: Value, #[case] field: &str) {
        let mut ports = TestPorts::default();
        ports.signup.expect_signup().never();

        let req = actix_test::TestRequest::post()
            .uri("/api/users/signup")
            .set_json(payload);
        let (status, body) = send(ports, req).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], INVALID_INPUTS);
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn login_acknowledges_valid_credentials() {
        let mut ports = TestPorts::default();
        ports
            .login
            .expect_login()
            .withf(|credentials| {
                credentials.email() == "test@test.com" && credentials.password() == "testers"
            })
            .returning(|_| Ok(UserId::random()));

        let req = actix_test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(LoginRequest {
                email: "test@test.com".into(),
                password: "testers".into(),
            });
        let (status, body) = send(ports, req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": LOGGED_IN }));
    }

    #[actix_web::test]
    async fn login_failure_is_unauthorised() {
        let mut ports = TestPorts::default();
        ports
            .login
            .expect_login()
            .returning(|_| Err(Error::unauthorized(INVALID_CREDENTIALS)));

        let req = actix_test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(LoginRequest {
                email: "test@test.com".into(),
                password: "wrong".into(),
            });
        let (status, body) = send(ports, req).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], INVALID_CREDENTIALS);
    }

    /// Counts events whose message is `message`.
    struct MessageCounter {
        message: &'static str,
        seen: Arc<AtomicUsize>,
    }

    struct MessageField(Option<String>);

    impl tracing::field::Visit for MessageField {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = Some(format!("{value:?}"));
            }
        }
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for MessageCounter {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let mut field = MessageField(None);
            event.record(&mut field);
            if field.0.as_deref() == Some(self.message) {
                self.seen.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[actix_web::test]
    async fn signup_is_logged_once() {
        let seen = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(MessageCounter {
            message: "user signed up",
            seen: Arc::clone(&seen),
        });
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut state = HttpState::clone(&state_with(TestPorts::default()));
        state.signup = Arc::new(UserAccountService::new(Arc::new(MemoryDocumentStore::new())));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/api").configure(configure_api)),
        )
        .await;
        let res =
            actix_test::call_service(&app, signup_request("once@test.com").to_request()).await;

        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
