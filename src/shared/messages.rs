//! User-facing message catalog.
//!
//! Messages returned to the mobile client, written in the product display
//! language (pt-BR). Field rule messages sit next to their rule in the DTOs'
//! `#[validate]` attributes.

// =============================================================================
// CREDENTIALS
// =============================================================================

pub const EMAIL_INVALID: &str = "Informe um e-mail válido";
pub const PASSWORD_LENGTH: &str = "A senha deve ter entre 8 e 50 caracteres";
pub const PASSWORD_UPPERCASE: &str = "A senha deve conter pelo menos uma letra maiúscula";
pub const PASSWORD_LOWERCASE: &str = "A senha deve conter pelo menos uma letra minúscula";
pub const PASSWORD_DIGIT: &str = "A senha deve conter pelo menos um número";
pub const PASSWORD_SPECIAL: &str =
    "A senha deve conter pelo menos um caractere especial (!@#$%^&*(),.?\":{}|<>)";

// =============================================================================
// PROFILE
// =============================================================================

pub const NEW_PASSWORD_REJECTED: &str = "A nova senha não atende aos requisitos de segurança";

// =============================================================================
// REQUEST BODY
// =============================================================================

pub const INVALID_FIELD_TYPE: &str = "Campo com tipo inválido";
pub const INVALID_JSON: &str = "O corpo da requisição não é um JSON válido";
pub const MISSING_JSON_CONTENT_TYPE: &str = "O cabeçalho Content-Type deve ser application/json";

// =============================================================================
// OUTCOMES
// =============================================================================

pub const REGISTER_SUCCESS: &str = "Cadastro realizado com sucesso";
pub const LOGIN_SUCCESS: &str = "Login realizado com sucesso";
pub const PROFILE_UPDATED: &str = "Perfil atualizado com sucesso";
pub const PASSWORD_CHANGED: &str = "Senha alterada com sucesso";
pub const CONTACT_CREATED: &str = "Contato de emergência adicionado";
pub const CONTACT_UPDATED: &str = "Contato de emergência atualizado";
pub const CONTACT_DELETED: &str = "Contato de emergência removido";
pub const ALERT_SENT: &str = "Alerta de emergência enviado";
pub const ALERT_RESOLVED: &str = "Alerta de emergência encerrado";

// =============================================================================
// FAILURES
// =============================================================================

pub const AUTH_REQUIRED: &str = "Autenticação necessária";
pub const INVALID_TOKEN: &str = "Sessão inválida ou expirada";
pub const INVALID_CREDENTIALS: &str = "E-mail ou senha inválidos";
pub const ACCOUNT_DISABLED: &str = "Esta conta está desativada";
pub const EMAIL_ALREADY_REGISTERED: &str = "Este e-mail já está cadastrado";
pub const CURRENT_PASSWORD_INCORRECT: &str = "A senha atual está incorreta";
pub const ACCOUNT_WITHOUT_EMAIL: &str = "Esta conta não possui e-mail cadastrado";
pub const CONTACT_NOT_FOUND: &str = "Contato de emergência não encontrado";
pub const ALERT_NOT_FOUND: &str = "Alerta de emergência não encontrado";
pub const ALERT_ALREADY_RESOLVED: &str = "Este alerta já foi encerrado";
pub const INTERNAL_ERROR: &str = "Erro interno do servidor";
pub const DATABASE_ERROR: &str = "Erro ao acessar o banco de dados";
