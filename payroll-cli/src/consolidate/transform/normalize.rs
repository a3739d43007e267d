//! Per-sheet header resolution and per-row normalization

use std::collections::BTreeMap;

use crate::consolidate::{CanonicalRecord, Field, RawRecord};
use crate::services::aliases::{AliasMatch, AliasResolver};

use super::names::NameSplitter;
use super::workplace::merge_workplace;

/// Placeholder strings some exports use for a missing RUT
const NULL_TOKENS: &[&str] = &["NAN", "NONE", "NULL"];

/// How given name and surname are obtained for a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMode {
    /// No name columns at all
    None,
    /// Separate given-name / surname columns
    Discrete,
    /// One column holding whole names, split heuristically
    Combined(usize),
}

/// How one header of a sheet was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnResolution {
    pub index: usize,
    pub header: String,
    pub matched: Option<AliasMatch>,
    /// Set when an earlier column already claimed the same field
    pub duplicate: bool,
}

/// Header resolution for one sheet, computed once and reused for every row
#[derive(Debug, Clone)]
pub struct SheetLayout {
    columns: Vec<ColumnResolution>,
    field_columns: BTreeMap<Field, usize>,
    name_mode: NameMode,
}

impl SheetLayout {
    pub fn resolve(headers: &[String], resolver: &AliasResolver) -> Self {
        let mut columns = Vec::with_capacity(headers.len());
        let mut field_columns = BTreeMap::new();

        for (index, header) in headers.iter().enumerate() {
            let matched = if header.trim().is_empty() {
                None
            } else {
                resolver.resolve(header)
            };

            let mut duplicate = false;
            if let Some(m) = matched {
                if field_columns.contains_key(&m.field) {
                    duplicate = true;
                    log::debug!(
                        "Column '{}' repeats {}, keeping the first one",
                        header,
                        m.field.key()
                    );
                } else {
                    field_columns.insert(m.field, index);
                }
            }

            columns.push(ColumnResolution {
                index,
                header: header.clone(),
                matched,
                duplicate,
            });
        }

        let name_mode = Self::detect_name_mode(&field_columns);

        Self {
            columns,
            field_columns,
            name_mode,
        }
    }

    fn detect_name_mode(field_columns: &BTreeMap<Field, usize>) -> NameMode {
        let given = field_columns.get(&Field::GivenName);
        let surname = field_columns.get(&Field::Surname);
        let full = field_columns.get(&Field::FullName);

        match (given, surname, full) {
            (None, None, Some(col)) => NameMode::Combined(*col),
            // A lone "nombre" column carries whole names in client files
            (Some(col), None, None) => NameMode::Combined(*col),
            (None, None, None) => NameMode::None,
            _ => NameMode::Discrete,
        }
    }

    pub fn columns(&self) -> &[ColumnResolution] {
        &self.columns
    }

    pub fn name_mode(&self) -> NameMode {
        self.name_mode
    }

    pub fn column_of(&self, field: Field) -> Option<usize> {
        self.field_columns.get(&field).copied()
    }

    pub fn has_rut(&self) -> bool {
        self.field_columns.contains_key(&Field::Rut)
    }

    /// Non-blank headers that no alias recognized
    pub fn unmapped_headers(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.matched.is_none() && !c.header.trim().is_empty())
            .map(|c| c.header.as_str())
            .collect()
    }

    fn is_unmapped(&self, index: usize) -> bool {
        self.columns
            .get(index)
            .map(|c| c.matched.is_none() || c.duplicate)
            .unwrap_or(false)
    }
}

/// Result of normalizing one raw row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted(CanonicalRecord),
    /// RUT missing or unusable; the row is dropped and counted
    MissingRut,
    /// Every cell blank; ignored without counting
    Blank,
}

/// Trim, uppercase and reject placeholder values
pub fn normalize_rut(raw: &str) -> Option<String> {
    let rut = raw.trim().to_uppercase();
    if rut.is_empty() || NULL_TOKENS.contains(&rut.as_str()) {
        None
    } else {
        Some(rut)
    }
}

/// Produce a canonical record from one raw row of a resolved sheet
pub fn normalize_row(
    layout: &SheetLayout,
    raw: &RawRecord,
    splitter: &dyn NameSplitter,
) -> RowOutcome {
    if raw.is_blank() {
        return RowOutcome::Blank;
    }

    let text = |field: Field| -> Option<String> {
        layout
            .column_of(field)
            .map(|col| raw.cell(col).to_text())
            .filter(|s| !s.is_empty())
    };

    let rut = match text(Field::Rut).as_deref().and_then(normalize_rut) {
        Some(rut) => rut,
        None => return RowOutcome::MissingRut,
    };

    let mut fields = BTreeMap::new();

    for field in Field::OUTPUT {
        match field {
            Field::GivenName | Field::Surname | Field::Workplace | Field::Rut => continue,
            _ => {}
        }
        if let Some(value) = text(field) {
            fields.insert(field, value);
        }
    }

    match layout.name_mode() {
        NameMode::Discrete => {
            if let Some(given) = text(Field::GivenName) {
                fields.insert(Field::GivenName, given);
            }
            if let Some(surname) = text(Field::Surname) {
                fields.insert(Field::Surname, surname);
            }
        }
        NameMode::Combined(col) => {
            let (given, surname) = splitter.split(&raw.cell(col).to_text());
            fields.insert(Field::GivenName, given);
            fields.insert(Field::Surname, surname);
        }
        NameMode::None => {}
    }

    let has_workplace_parts = layout.column_of(Field::WorkplaceCode).is_some()
        || layout.column_of(Field::WorkplaceName).is_some();
    let workplace = if has_workplace_parts {
        Some(merge_workplace(
            text(Field::WorkplaceCode).as_deref(),
            text(Field::WorkplaceName).as_deref(),
        ))
    } else {
        text(Field::Workplace)
    };
    if let Some(workplace) = workplace {
        fields.insert(Field::Workplace, workplace);
    }

    let unmapped = raw
        .cells
        .iter()
        .enumerate()
        .filter(|(idx, (header, _))| layout.is_unmapped(*idx) && !header.trim().is_empty())
        .map(|(_, (header, value))| (header.clone(), value.to_text()))
        .collect();

    RowOutcome::Accepted(CanonicalRecord::new(
        raw.origin.clone(),
        rut,
        fields,
        unmapped,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consolidate::transform::names::HeuristicNameSplitter;
    use crate::consolidate::{CellValue, RecordOrigin};

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn raw(headers: &[String], values: &[&str]) -> RawRecord {
        let origin = RecordOrigin {
            file: "cliente.xlsx".to_string(),
            sheet: "Hoja1".to_string(),
            row: 2,
        };
        let cells = headers
            .iter()
            .zip(values.iter())
            .map(|(h, v)| {
                let value = if v.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::from(*v)
                };
                (h.clone(), value)
            })
            .collect();
        RawRecord::new(origin, cells)
    }

    struct PanicSplitter;

    impl NameSplitter for PanicSplitter {
        fn split(&self, _full_name: &str) -> (String, String) {
            panic!("splitter must not run when discrete columns exist");
        }
    }

    fn accept(outcome: RowOutcome) -> CanonicalRecord {
        match outcome {
            RowOutcome::Accepted(record) => record,
            other => panic!("expected accepted row, got {:?}", other),
        }
    }

    #[test]
    fn test_full_name_column_is_split() {
        let resolver = AliasResolver::builtin();
        let h = headers(&["RUT Trabajador", "Nombre Completo", "E-mail"]);
        let layout = SheetLayout::resolve(&h, &resolver);
        assert_eq!(layout.name_mode(), NameMode::Combined(1));

        let record = accept(normalize_row(
            &layout,
            &raw(&h, &["12345678-k", "Ana María Rojas Soto", "ana@example.cl"]),
            &HeuristicNameSplitter,
        ));

        assert_eq!(record.rut(), "12345678-K");
        assert_eq!(record.get(Field::GivenName), "Ana María");
        assert_eq!(record.get(Field::Surname), "Rojas Soto");
        assert_eq!(record.get(Field::Email), "ana@example.cl");
    }

    #[test]
    fn test_discrete_columns_take_precedence() {
        let resolver = AliasResolver::builtin();
        let h = headers(&["rut", "nombre completo", "nombres", "apellidos"]);
        let layout = SheetLayout::resolve(&h, &resolver);
        assert_eq!(layout.name_mode(), NameMode::Discrete);

        let record = accept(normalize_row(
            &layout,
            &raw(&h, &["1-9", "Ana Rojas Soto", "Ana", "Rojas Soto"]),
            &PanicSplitter,
        ));
        assert_eq!(record.get(Field::GivenName), "Ana");
        assert_eq!(record.get(Field::Surname), "Rojas Soto");
    }

    #[test]
    fn test_given_name_column_beats_full_name_column() {
        let resolver = AliasResolver::builtin();
        let h = headers(&["rut", "nombres", "nombre completo"]);
        let layout = SheetLayout::resolve(&h, &resolver);
        assert_eq!(layout.name_mode(), NameMode::Discrete);

        let record = accept(normalize_row(
            &layout,
            &raw(&h, &["1-9", "Ana", "Ana Sofía Rojas Soto Pérez"]),
            &PanicSplitter,
        ));
        assert_eq!(record.get(Field::GivenName), "Ana");
        assert_eq!(record.get(Field::Surname), "");
    }

    #[test]
    fn test_surname_column_alone_is_discrete() {
        let resolver = AliasResolver::builtin();
        let h = headers(&["rut", "apellidos", "nombre completo"]);
        let layout = SheetLayout::resolve(&h, &resolver);
        assert_eq!(layout.name_mode(), NameMode::Discrete);

        let record = accept(normalize_row(
            &layout,
            &raw(&h, &["1-9", "Rojas", "Ana Rojas"]),
            &PanicSplitter,
        ));
        assert_eq!(record.get(Field::Surname), "Rojas");
    }

    #[test]
    fn test_lone_nombre_column_is_treated_as_full_name() {
        let resolver = AliasResolver::builtin();
        let h = headers(&["Nombre", "RUT"]);
        let layout = SheetLayout::resolve(&h, &resolver);
        assert_eq!(layout.name_mode(), NameMode::Combined(0));

        let record = accept(normalize_row(
            &layout,
            &raw(&h, &["Juan de la Cruz", "2-7"]),
            &HeuristicNameSplitter,
        ));
        assert_eq!(record.get(Field::GivenName), "Juan");
        assert_eq!(record.get(Field::Surname), "de la Cruz");
    }

    #[test]
    fn test_workplace_columns_are_merged() {
        let resolver = AliasResolver::builtin();
        let h = headers(&["rut", "RBD", "Establecimiento", "centro de trabajo"]);
        let layout = SheetLayout::resolve(&h, &resolver);

        let record = accept(normalize_row(
            &layout,
            &raw(&h, &["1-9", "101", "ESCUELA CENTRAL", "ignorado"]),
            &HeuristicNameSplitter,
        ));
        assert_eq!(record.get(Field::Workplace), "101 - Escuela Central");

        let record = accept(normalize_row(
            &layout,
            &raw(&h, &["2-7", "", "", "ignorado"]),
            &HeuristicNameSplitter,
        ));
        assert_eq!(record.get(Field::Workplace), "");
    }

    #[test]
    fn test_direct_workplace_column_is_copied() {
        let resolver = AliasResolver::builtin();
        let h = headers(&["rut", "Centro de Trabajo"]);
        let layout = SheetLayout::resolve(&h, &resolver);

        let record = accept(normalize_row(
            &layout,
            &raw(&h, &["1-9", "Casa Matriz"]),
            &HeuristicNameSplitter,
        ));
        assert_eq!(record.get(Field::Workplace), "Casa Matriz");
    }

    #[test]
    fn test_missing_or_placeholder_rut_is_rejected() {
        let resolver = AliasResolver::builtin();
        let h = headers(&["rut", "correo"]);
        let layout = SheetLayout::resolve(&h, &resolver);

        for value in ["", "   ", "nan", "None", "NULL"] {
            let outcome = normalize_row(
                &layout,
                &raw(&h, &[value, "x@example.cl"]),
                &HeuristicNameSplitter,
            );
            assert_eq!(outcome, RowOutcome::MissingRut, "value {:?}", value);
        }
    }

    #[test]
    fn test_sheet_without_rut_column_rejects_rows() {
        let resolver = AliasResolver::builtin();
        let h = headers(&["correo"]);
        let layout = SheetLayout::resolve(&h, &resolver);
        assert!(!layout.has_rut());

        let outcome = normalize_row(&layout, &raw(&h, &["x@example.cl"]), &HeuristicNameSplitter);
        assert_eq!(outcome, RowOutcome::MissingRut);
    }

    #[test]
    fn test_blank_row_is_not_counted_as_missing_rut() {
        let resolver = AliasResolver::builtin();
        let h = headers(&["rut", "correo"]);
        let layout = SheetLayout::resolve(&h, &resolver);

        let outcome = normalize_row(&layout, &raw(&h, &["", "  "]), &HeuristicNameSplitter);
        assert_eq!(outcome, RowOutcome::Blank);
    }

    #[test]
    fn test_duplicate_and_unknown_columns_are_kept_as_unmapped() {
        let resolver = AliasResolver::builtin();
        let h = headers(&["rut", "mail", "email", "sueldo", ""]);
        let layout = SheetLayout::resolve(&h, &resolver);
        assert_eq!(layout.unmapped_headers(), vec!["sueldo"]);
        assert!(layout.columns()[2].duplicate);

        let record = accept(normalize_row(
            &layout,
            &raw(&h, &["1-9", "first@example.cl", "second@example.cl", "900000", "x"]),
            &HeuristicNameSplitter,
        ));
        assert_eq!(record.get(Field::Email), "first@example.cl");
        assert_eq!(
            record.unmapped(),
            &[
                ("email".to_string(), "second@example.cl".to_string()),
                ("sueldo".to_string(), "900000".to_string()),
            ]
        );
    }
}
