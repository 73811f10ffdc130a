//! The form holding the inputs of a spin.

use nameth::NamedEnumValues as _;
use nameth::nameth;

use crate::api::client::spin::SpinRequest;
use crate::numero::Numero;
use crate::numero::ParseNumeroError;

pub const NUMERO: &str = "numero";
pub const MODO: &str = "modo";

/// A form exposing the current value of its fields by name.
///
/// Implemented on top of the DOM in the browser, and by [FormValues] elsewhere.
pub trait FormInput {
    fn field(&self, name: &'static str) -> Option<String>;
}

/// A form whose values are already known.
#[derive(Clone, Debug, Default)]
pub struct FormValues {
    pub numero: String,
    pub modo: String,
}

impl FormValues {
    pub fn new(numero: impl Into<String>, modo: impl Into<String>) -> Self {
        Self {
            numero: numero.into(),
            modo: modo.into(),
        }
    }
}

impl FormInput for FormValues {
    fn field(&self, name: &'static str) -> Option<String> {
        match name {
            NUMERO => Some(self.numero.clone()),
            MODO => Some(self.modo.clone()),
            _ => None,
        }
    }
}

/// Reads the current state of the form into a fresh [SpinRequest].
pub fn read_spin_request(form: &(impl FormInput + ?Sized)) -> Result<SpinRequest, FormError> {
    let numero = form
        .field(NUMERO)
        .ok_or(FormError::MissingField { name: NUMERO })?;
    let modo = form
        .field(MODO)
        .ok_or(FormError::MissingField { name: MODO })?;
    let numero = Numero::parse(&numero)?;
    Ok(SpinRequest { numero, modo })
}

#[nameth]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("[{n}] Field '{name}' not found", n = self.name())]
    MissingField { name: &'static str },

    #[error("[{n}] {0}", n = self.name())]
    InvalidNumero(#[from] ParseNumeroError),
}
