// Form input coercion.

use pgs_api::{GradeUpdate, GradeValues};

use super::layout::GradeForm;
use crate::page::Page;

/// Optional counter: anything that does not parse as a non-negative
/// integer counts as 0.
pub(crate) fn parse_counter(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Empty input is `Ok(None)`; anything else must parse.
fn parse_whole(raw: &str) -> Result<Option<i64>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| ())
}

/// Grades accept either `,` or `.` as the decimal separator.
fn parse_decimal(raw: &str) -> Result<Option<f64>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.replace(',', ".").parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(()),
    }
}

/// Read the grade form. Blank fields are left out; a field that is
/// filled in but does not parse yields the warning to show.
pub(crate) fn read_grade_update(page: &Page, form: &GradeForm) -> Result<GradeUpdate, String> {
    let invalid = |label: &str| format!("Valor inválido no campo {label}.");
    Ok(GradeUpdate {
        faltas: parse_whole(&page.field(&form.faltas)).map_err(|()| invalid("Faltas"))?,
        nota_tutor: parse_decimal(&page.field(&form.nota_tutor))
            .map_err(|()| invalid("Nota do tutor"))?,
        nota_avaliacao_regular: parse_decimal(&page.field(&form.nota_avaliacao_regular))
            .map_err(|()| invalid("Avaliação regular"))?,
        nota_recuperacao: parse_decimal(&page.field(&form.nota_recuperacao))
            .map_err(|()| invalid("Recuperação"))?,
        nota_final: parse_decimal(&page.field(&form.nota_final))
            .map_err(|()| invalid("Nota final"))?,
    })
}

/// Every grade field is required.
pub(crate) fn read_grade_values(page: &Page, form: &GradeForm) -> Result<GradeValues, String> {
    let update = read_grade_update(page, form)?;
    match update {
        GradeUpdate {
            faltas: Some(faltas),
            nota_tutor: Some(nota_tutor),
            nota_avaliacao_regular: Some(nota_avaliacao_regular),
            nota_recuperacao: Some(nota_recuperacao),
            nota_final: Some(nota_final),
        } => Ok(GradeValues {
            faltas,
            nota_tutor,
            nota_avaliacao_regular,
            nota_recuperacao,
            nota_final,
        }),
        _ => Err("Por favor, preencha todos os campos.".into()),
    }
}
