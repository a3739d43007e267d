//! Canonical fields and the output schema

use crate::services::aliases::normalize_header;

/// A canonical field. Output fields make up the template; the remaining
/// variants only exist while a row is being normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    GivenName,
    Surname,
    Rut,
    Email,
    Address,
    Phone,
    HireDate,
    BirthDate,
    Position,
    UserType,
    Workplace,
    Subcompany,
    Contractor,
    SupervisorRut,
    WelcomeEmail,
    Area,
    // Intermediate fields, never written
    FullName,
    WorkplaceCode,
    WorkplaceName,
}

impl Field {
    /// The template columns, in output order
    pub const OUTPUT: [Field; 16] = [
        Field::GivenName,
        Field::Surname,
        Field::Rut,
        Field::Email,
        Field::Address,
        Field::Phone,
        Field::HireDate,
        Field::BirthDate,
        Field::Position,
        Field::UserType,
        Field::Workplace,
        Field::Subcompany,
        Field::Contractor,
        Field::SupervisorRut,
        Field::WelcomeEmail,
        Field::Area,
    ];

    /// Every field, output fields first
    pub const ALL: [Field; 19] = [
        Field::GivenName,
        Field::Surname,
        Field::Rut,
        Field::Email,
        Field::Address,
        Field::Phone,
        Field::HireDate,
        Field::BirthDate,
        Field::Position,
        Field::UserType,
        Field::Workplace,
        Field::Subcompany,
        Field::Contractor,
        Field::SupervisorRut,
        Field::WelcomeEmail,
        Field::Area,
        Field::FullName,
        Field::WorkplaceCode,
        Field::WorkplaceName,
    ];

    /// Header label as written in the template
    pub fn label(&self) -> &'static str {
        match self {
            Field::GivenName => "nombre",
            Field::Surname => "apellido",
            Field::Rut => "rut",
            Field::Email => "correo",
            Field::Address => "direccion",
            Field::Phone => "telefono",
            Field::HireDate => "fecha de ingreso",
            Field::BirthDate => "fecha de nacimiento",
            Field::Position => "cargo",
            Field::UserType => "tipo de usuario",
            Field::Workplace => "centro de trabajo",
            Field::Subcompany => "subempresa",
            Field::Contractor => "empresacontratista",
            Field::SupervisorRut => "rut supervisor",
            Field::WelcomeEmail => "correo de bienvenida",
            Field::Area => "área",
            Field::FullName => "full name",
            Field::WorkplaceCode => "workplace code",
            Field::WorkplaceName => "workplace name",
        }
    }

    /// Stable identifier used in logs and the config file
    pub fn key(&self) -> &'static str {
        match self {
            Field::GivenName => "given_name",
            Field::Surname => "surname",
            Field::Rut => "rut",
            Field::Email => "email",
            Field::Address => "address",
            Field::Phone => "phone",
            Field::HireDate => "hire_date",
            Field::BirthDate => "birth_date",
            Field::Position => "position",
            Field::UserType => "user_type",
            Field::Workplace => "workplace",
            Field::Subcompany => "subcompany",
            Field::Contractor => "contractor",
            Field::SupervisorRut => "supervisor_rut",
            Field::WelcomeEmail => "welcome_email",
            Field::Area => "area",
            Field::FullName => "full_name",
            Field::WorkplaceCode => "workplace_code",
            Field::WorkplaceName => "workplace_name",
        }
    }

    pub fn is_output(&self) -> bool {
        !matches!(
            self,
            Field::FullName | Field::WorkplaceCode | Field::WorkplaceName
        )
    }

    /// Look up a field by its label or key, ignoring case and accents
    pub fn from_name(name: &str) -> Option<Field> {
        let wanted = normalize_header(name);
        if wanted.is_empty() {
            return None;
        }

        Field::ALL.into_iter().find(|field| {
            normalize_header(field.label()) == wanted || normalize_header(field.key()) == wanted
        })
    }
}
