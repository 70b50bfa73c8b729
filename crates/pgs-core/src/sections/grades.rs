// Per-student, per-module grade records.

use pgs_api::{GradeAssignment, GradeRecord};
use tracing::info;

use super::form::{read_grade_update, read_grade_values};
use super::{Sections, Settled, settled};
use crate::format::format_number;
use crate::model::Selection;
use crate::view::{Fragment, GradeSheet};

const NOTHING_TO_UPDATE: &str = "Preencha ao menos um campo para atualizar.";

impl Sections {
    /// Load a grade record, render it, and fill the grade form with its
    /// current values. The returned selection is what the save
    /// operations take; a failed load hands back how it settled.
    pub async fn open_grade_record(
        &self,
        aluno_id: i64,
        module_id: i64,
    ) -> Result<Selection, Settled> {
        let form = &self.layout.grades;
        let page = &self.page;
        page.clear_message(&form.message);
        page.show_loading(&form.sheet);

        let dispatch = self.client.grade_record(aluno_id, module_id).await;
        let record: GradeRecord = self
            .accept(&form.message, dispatch)
            .and_then(|data| self.decode(&form.message, data))
            .inspect_err(|_| page.clear_message(&form.sheet))?;

        let selection = Selection::new(aluno_id, module_id);
        page.set_field(&form.faltas, record.faltas.to_string());
        page.set_field(&form.nota_tutor, format_number(record.nota_tutor, 1));
        page.set_field(
            &form.nota_avaliacao_regular,
            format_number(record.nota_avaliacao_regular, 1),
        );
        page.set_field(&form.nota_recuperacao, format_number(record.nota_recuperacao, 1));
        page.set_field(&form.nota_final, format_number(record.nota_final, 1));
        page.render(
            &form.sheet,
            Fragment::GradeSheet(GradeSheet::new(selection, &record)),
        );
        Ok(selection)
    }

    /// Send only the grade fields that are filled in.
    pub async fn save_grade_record(&self, selection: &Selection) -> Settled {
        settled(self.try_save_grade_record(selection).await)
    }

    async fn try_save_grade_record(&self, selection: &Selection) -> Result<(), Settled> {
        let form = &self.layout.grades;
        let update = read_grade_update(&self.page, form)
            .map_err(|message| self.invalid(&form.message, message))?;
        if update.is_empty() {
            return Err(self.invalid(&form.message, NOTHING_TO_UPDATE));
        }

        self.page.clear_message(&form.message);
        let _busy = self.busy(&form.submit);
        let dispatch = self
            .client
            .update_grade_record(selection.aluno_id, selection.module_id, &update)
            .await;
        let data = self.accept(&form.message, dispatch)?;

        info!(
            aluno_id = selection.aluno_id,
            module_id = selection.module_id,
            "grade record updated"
        );
        self.confirm(&form.message, &data);
        self.page.clear_fields(form.fields());
        Ok(())
    }

    /// Insert a complete grade record for the selection.
    pub async fn assign_grade_record(&self, selection: &Selection) -> Settled {
        settled(self.try_write_grade_record(selection, true).await)
    }

    /// Overwrite every field of the selection's grade record.
    pub async fn replace_grade_record(&self, selection: &Selection) -> Settled {
        settled(self.try_write_grade_record(selection, false).await)
    }

    async fn try_write_grade_record(
        &self,
        selection: &Selection,
        insert: bool,
    ) -> Result<(), Settled> {
        let form = &self.layout.grades;
        let values = read_grade_values(&self.page, form)
            .map_err(|message| self.invalid(&form.message, message))?;

        self.page.clear_message(&form.message);
        let _busy = self.busy(&form.submit);
        let dispatch = if insert {
            let assignment = GradeAssignment {
                aluno_id: selection.aluno_id,
                module_id: selection.module_id,
                values,
            };
            self.client.assign_grade_record(&assignment).await
        } else {
            self.client
                .replace_grade_record(selection.aluno_id, selection.module_id, &values)
                .await
        };
        let data = self.accept(&form.message, dispatch)?;

        info!(
            aluno_id = selection.aluno_id,
            module_id = selection.module_id,
            insert,
            "grade record written"
        );
        self.confirm(&form.message, &data);
        Ok(())
    }
}
