//! Opt-in input checks run ahead of the backend call when
//! `API_STRICT_VALIDATION` is enabled. With it off, payloads go to the
//! backend untouched and the backend's own answer is the contract.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ApiError;

pub const MAX_TITULO_CHARS: usize = 200;
pub const MIN_SENHA_CHARS: usize = 6;

type FieldErrors = BTreeMap<String, String>;

fn finish(errors: FieldErrors) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error(errors))
    }
}

fn required_text(errors: &mut FieldErrors, field: &str, value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::String(_)) | None | Some(Value::Null) => {
            errors.insert(field.to_string(), "campo obrigatório".to_string());
            None
        }
        Some(_) => {
            errors.insert(field.to_string(), "deve ser texto".to_string());
            None
        }
    }
}

pub fn validate_new_chamado(titulo: Option<&Value>, descricao: Option<&Value>) -> Result<(), ApiError> {
    let mut errors = FieldErrors::new();

    if let Some(titulo) = required_text(&mut errors, "titulo", titulo) {
        if titulo.chars().count() > MAX_TITULO_CHARS {
            errors.insert(
                "titulo".to_string(),
                format!("máximo de {} caracteres", MAX_TITULO_CHARS),
            );
        }
    }
    required_text(&mut errors, "descricao", descricao);

    finish(errors)
}

pub fn validate_registration(
    nome: Option<&str>,
    email: Option<&str>,
    senha: Option<&str>,
) -> Result<(), ApiError> {
    let mut errors = FieldErrors::new();
    let text = |v: Option<&str>| v.map(|s| Value::String(s.to_string()));

    required_text(&mut errors, "nome", text(nome).as_ref());

    if let Some(email) = required_text(&mut errors, "email", text(email).as_ref()) {
        if !email.contains('@') {
            errors.insert("email".to_string(), "email inválido".to_string());
        }
    }

    if let Some(senha) = senha {
        if senha.chars().count() < MIN_SENHA_CHARS {
            errors.insert(
                "senha".to_string(),
                format!("mínimo de {} caracteres", MIN_SENHA_CHARS),
            );
        }
    } else {
        errors.insert("senha".to_string(), "campo obrigatório".to_string());
    }

    finish(errors)
}
