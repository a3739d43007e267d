//! Header normalization and the built-in synonym table

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::consolidate::Field;

/// Known client labels for each field, in registration order.
///
/// Output labels are registered separately as identity aliases before
/// this table, so they always resolve to their own field.
pub const BUILTIN_SYNONYMS: &[(Field, &[&str])] = &[
    (
        Field::FullName,
        &[
            "nombre completo",
            "nombres y apellidos",
            "nombre trabajador",
            "trabajador",
            "colaborador",
            "empleado",
        ],
    ),
    (Field::GivenName, &["nombre", "nombres", "primer nombre"]),
    (Field::Surname, &["apellido", "apellidos"]),
    (
        Field::Email,
        &["email", "correo electronico", "e-mail", "mail"],
    ),
    (
        Field::Rut,
        &["rut trabajador", "rut empleado", "identificacion", "run", "r.u.t"],
    ),
    (Field::Phone, &["celular", "telefono", "fono", "tel"]),
    (
        Field::HireDate,
        &[
            "fecha ingreso",
            "ingreso",
            "fecha contratacion",
            "fecha de inicio de contrato",
            "fecha inicio contrato",
            "inicio de contrato",
            "inicio contrato",
        ],
    ),
    (
        Field::BirthDate,
        &["fecha nacimiento", "nacimiento", "fecha de nac", "cumpleaños"],
    ),
    (Field::Area, &["area", "departamento", "seccion"]),
    (
        Field::WorkplaceCode,
        &["rbd informado por vero", "rbd", "codigo rbd"],
    ),
    (
        Field::WorkplaceName,
        &["nombre rbd", "establecimiento", "colegio"],
    ),
];

/// Normalize a header for lookup.
///
/// Accents are stripped (NFD, combining marks dropped), text is lowercased,
/// `_` and whitespace collapse to a single space and any other punctuation
/// is removed. `" R.U.T "`, `"r.u.t"` and `"RUT"` all become `"rut"`.
pub fn normalize_header(header: &str) -> String {
    let mut cleaned = String::with_capacity(header.len());
    for c in header.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_alphanumeric() {
            cleaned.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '_' {
            cleaned.push(' ');
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_case_accents_and_punctuation() {
        assert_eq!(normalize_header("  Área "), "area");
        assert_eq!(normalize_header("R.U.T"), "rut");
        assert_eq!(normalize_header("E-Mail"), "email");
        assert_eq!(normalize_header("Cumpleaños"), "cumpleanos");
        assert_eq!(normalize_header("fecha_de   ingreso"), "fecha de ingreso");
        assert_eq!(normalize_header("Sección"), "seccion");
    }

    #[test]
    fn test_normalize_blank() {
        assert_eq!(normalize_header(""), "");
        assert_eq!(normalize_header("  .  "), "");
    }
}
