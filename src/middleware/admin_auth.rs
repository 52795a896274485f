/// Autenticação dos endpoints administrativos
///
/// Toda rota /admin/* passa por aqui antes de tocar o banco. A verificação é
/// uma comparação de segredo compartilhado: o header X-Admin-Key da requisição
/// contra a chave configurada no processo (ADMIN_API_KEY).
///
/// # Configuração
///
/// ```bash
/// export ADMIN_API_KEY="uma-chave-aleatoria-segura"
/// ```
///
/// # Uso na requisição
///
/// ```bash
/// curl -H "X-Admin-Key: uma-chave-aleatoria-segura" \
///   https://api.baixatudo.app/admin/stats/downloads
/// ```
///
/// # Respostas
///
/// - **200 OK**: chave válida, segue para o handler
/// - **401 Unauthorized**: chave ausente, inválida ou servidor sem chave configurada
///
/// # Segurança
///
/// Sem ADMIN_API_KEY configurada o acesso é SEMPRE negado (fail closed),
/// inclusive em desenvolvimento. A chave é injetada no guard na construção;
/// nada aqui lê variáveis de ambiente durante a requisição.
///
/// O desenho atual não tem rate limiting, audit log nem rotação de chave;
/// são omissões conhecidas e deliberadas, a acrescentar como extensões, não
/// de forma silenciosa dentro do guard.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::Settings;

/// Header que carrega a credencial administrativa
pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// Resultado da verificação, sempre um dos dois ramos - quem chama é obrigado
/// a tratar os dois explicitamente
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Credencial válida, o handler pode prosseguir
    Proceed,
    /// Credencial ausente/inválida - resposta 401 terminal, nada mais roda
    Unauthorized,
}

/// Guard de autenticação administrativa
///
/// Puro: função apenas da requisição e da chave injetada. Sem estado entre
/// requisições, sem efeitos colaterais.
#[derive(Clone)]
pub struct AdminGuard {
    expected_key: Option<String>,
}

impl AdminGuard {
    pub fn new(expected_key: Option<String>) -> Self {
        Self { expected_key }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.admin.api_key.clone())
    }

    /// Compara a chave apresentada no header com a chave configurada.
    ///
    /// Ambos os lados são comparados após trim de espaços nas pontas; a
    /// comparação em si é byte a byte (case-sensitive, espaços internos
    /// contam). Chave configurada ausente ou vazia nega sempre.
    pub fn is_authorized(&self, headers: &HeaderMap) -> bool {
        let expected = match self.expected_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => return false,
        };

        let provided = headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        provided.trim() == expected
    }

    /// Decide o destino da requisição. Idempotente: mesma requisição e mesma
    /// configuração produzem sempre o mesmo resultado.
    pub fn enforce(&self, headers: &HeaderMap) -> AuthOutcome {
        if self.is_authorized(headers) {
            AuthOutcome::Proceed
        } else {
            AuthOutcome::Unauthorized
        }
    }
}

/// Middleware que exige a chave administrativa nos endpoints /admin/*
///
/// O guard roda ANTES do handler: requisição negada nunca alcança o código
/// que fala com o banco.
pub async fn require_admin_key(
    State(guard): State<AdminGuard>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    match guard.enforce(request.headers()) {
        AuthOutcome::Proceed => Ok(next.run(request).await),
        AuthOutcome::Unauthorized => Err(unauthorized_response()),
    }
}

/// Resposta 401 fixa - corpo em texto plano, sem headers extras
fn unauthorized_response() -> Response {
    (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{HeaderValue, Request as HttpRequest},
        middleware,
        routing::post,
        Router,
    };
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tower::ServiceExt;

    fn headers_with_key(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_KEY_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_chave_correta_autoriza() {
        let guard = AdminGuard::new(Some("abc123".to_string()));
        assert!(guard.is_authorized(&headers_with_key("abc123")));
        assert_eq!(guard.enforce(&headers_with_key("abc123")), AuthOutcome::Proceed);
    }

    #[test]
    fn test_espacos_nas_pontas_sao_ignorados() {
        let guard = AdminGuard::new(Some("abc123".to_string()));
        assert!(guard.is_authorized(&headers_with_key(" abc123 ")));

        // Também do lado da configuração
        let guard = AdminGuard::new(Some("  abc123  ".to_string()));
        assert!(guard.is_authorized(&headers_with_key("abc123")));
    }

    #[test]
    fn test_espacos_internos_negam() {
        let guard = AdminGuard::new(Some("abc 123".to_string()));
        assert!(!guard.is_authorized(&headers_with_key("abc123")));
        assert!(!guard.is_authorized(&headers_with_key("abc  123")));
    }

    #[test]
    fn test_comparacao_case_sensitive() {
        let guard = AdminGuard::new(Some("abc123".to_string()));
        assert!(!guard.is_authorized(&headers_with_key("ABC123")));
    }

    #[test]
    fn test_header_ausente_nega() {
        let guard = AdminGuard::new(Some("abc123".to_string()));
        assert_eq!(guard.enforce(&HeaderMap::new()), AuthOutcome::Unauthorized);
    }

    #[test]
    fn test_chave_nao_configurada_nega_sempre() {
        // Fail closed: sem chave no servidor, nenhum header passa
        let guard = AdminGuard::new(None);
        assert!(!guard.is_authorized(&HeaderMap::new()));
        assert!(!guard.is_authorized(&headers_with_key("")));
        assert!(!guard.is_authorized(&headers_with_key("qualquer-coisa")));

        // Chave configurada vazia (ou só espaços) equivale a ausente
        let guard = AdminGuard::new(Some("".to_string()));
        assert!(!guard.is_authorized(&headers_with_key("")));
        let guard = AdminGuard::new(Some("   ".to_string()));
        assert!(!guard.is_authorized(&headers_with_key("   ")));
    }

    #[test]
    fn test_enforce_idempotente() {
        let guard = AdminGuard::new(Some("abc123".to_string()));
        let ok = headers_with_key("abc123");
        let ruim = headers_with_key("outra");
        assert_eq!(guard.enforce(&ok), guard.enforce(&ok));
        assert_eq!(guard.enforce(&ruim), guard.enforce(&ruim));
    }

    /// Requisição negada não pode executar NENHUMA escrita: o handler por
    /// trás da layer é um contador e precisa terminar zerado.
    #[tokio::test]
    async fn test_negado_nao_alcanca_o_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_handler = calls.clone();

        let app = Router::new()
            .route(
                "/admin/ping",
                post(move || {
                    let calls = calls_handler.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        "ok"
                    }
                }),
            )
            .layer(middleware::from_fn_with_state(
                AdminGuard::new(Some("segredo".to_string())),
                require_admin_key,
            ));

        // Sem header: 401, handler nunca roda
        let response = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/admin/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Unauthorized");

        // Chave errada: idem
        let response = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/admin/ping")
                    .header(ADMIN_KEY_HEADER, "errada")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // Chave correta: handler executa uma vez
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/admin/ping")
                    .header(ADMIN_KEY_HEADER, "segredo")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
