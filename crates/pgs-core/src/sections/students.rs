// Student add/edit/delete/search/detail.

use pgs_api::{NewStudent, Student, StudentQuery, StudentUpdate};
use tracing::info;

use super::form::parse_counter;
use super::{Sections, Settled, View, settled};
use crate::view::{Fragment, Severity, StudentCard, StudentLink};

const REQUIRED_FIELDS: &str = "Por favor, preencha todos os campos obrigatórios.";
const MATRICULA_REQUIRED: &str = "Por favor, informe o número de matrícula.";
const SEARCH_TERMS_REQUIRED: &str = "Por favor, informe a matrícula ou o nome para pesquisa.";
const NO_STUDENTS_FOUND: &str = "Nenhum aluno encontrado.";

impl Sections {
    /// Create a student from the add form.
    ///
    /// On success the form is reset and, after the refresh delay, the
    /// modal closes and a students page asks to be reloaded.
    pub async fn add_student(&self) -> Settled {
        settled(self.try_add_student().await)
    }

    async fn try_add_student(&self) -> Result<(), Settled> {
        let form = &self.layout.add_student;
        let page = &self.page;
        let student = NewStudent {
            nome: page.field(&form.nome).trim().to_owned(),
            numero_matricula: page.field(&form.numero_matricula).trim().to_owned(),
            data_matricula: page.field(&form.data_matricula).trim().to_owned(),
            atestados: parse_counter(&page.field(&form.atestados)),
            encaminhamento: page.field(&form.encaminhamento).trim().to_owned(),
            obs: page.field(&form.obs).trim().to_owned(),
        };
        if student.nome.is_empty()
            || student.numero_matricula.is_empty()
            || student.data_matricula.is_empty()
        {
            return Err(self.invalid(&form.message, REQUIRED_FIELDS));
        }

        page.clear_message(&form.message);
        let _busy = self.busy(&form.submit);
        let dispatch = self.client.add_student(&student).await;
        let data = self.accept(&form.message, dispatch)?;

        info!(matricula = %student.numero_matricula, "student added");
        self.confirm(&form.message, &data);
        page.clear_fields(form.fields());
        page.set_field(&form.atestados, "0");

        let reload = self.layout.view == View::Students;
        self.after_create(form.modal.as_deref(), move |sections| async move {
            if reload {
                sections.page.request_reload();
            }
        });
        Ok(())
    }

    /// Save the edit form over the student with the given matrícula.
    pub async fn edit_student(&self) -> Settled {
        settled(self.try_edit_student().await)
    }

    async fn try_edit_student(&self) -> Result<(), Settled> {
        let form = &self.layout.edit_student;
        let page = &self.page;
        let matricula = page.field(&form.numero_matricula).trim().to_owned();
        let update = StudentUpdate {
            nome: page.field(&form.nome).trim().to_owned(),
            data_matricula: page.field(&form.data_matricula).trim().to_owned(),
            atestados: parse_counter(&page.field(&form.atestados)),
            encaminhamento: page.field(&form.encaminhamento).trim().to_owned(),
            obs: page.field(&form.obs).trim().to_owned(),
        };
        if matricula.is_empty() || update.nome.is_empty() || update.data_matricula.is_empty() {
            return Err(self.invalid(&form.message, REQUIRED_FIELDS));
        }

        page.clear_message(&form.message);
        let _busy = self.busy(&form.submit);
        let dispatch = self.client.edit_student(&matricula, &update).await;
        let data = self.accept(&form.message, dispatch)?;

        info!(%matricula, "student edited");
        self.confirm(&form.message, &data);
        Ok(())
    }

    /// Delete the student whose matrícula is in the delete form.
    pub async fn delete_student(&self) -> Settled {
        settled(self.try_delete_student().await)
    }

    async fn try_delete_student(&self) -> Result<(), Settled> {
        let form = &self.layout.delete_student;
        let matricula = self.page.field(&form.field).trim().to_owned();
        if matricula.is_empty() {
            return Err(self.invalid(&form.message, MATRICULA_REQUIRED));
        }

        self.page.clear_message(&form.message);
        let _busy = self.busy(&form.submit);
        let dispatch = self.client.delete_student(&matricula).await;
        let data = self.accept(&form.message, dispatch)?;

        info!(%matricula, "student deleted");
        self.confirm(&form.message, &data);
        self.page.clear_fields([form.field.as_str()]);
        Ok(())
    }

    /// Search by matrícula or name.
    ///
    /// No match shows an informational banner, one match a detail card,
    /// several a list linking to each student's detail view.
    pub async fn search_students(&self) -> Settled {
        settled(self.try_search_students().await)
    }

    async fn try_search_students(&self) -> Result<(), Settled> {
        let form = &self.layout.search;
        let page = &self.page;
        let query = StudentQuery {
            numero_matricula: page.field(&form.numero_matricula).trim().to_owned(),
            nome: page.field(&form.nome).trim().to_owned(),
        };
        if query.is_empty() {
            page.clear_message(&form.results);
            return Err(self.invalid(&form.message, SEARCH_TERMS_REQUIRED));
        }

        page.clear_message(&form.message);
        page.show_loading(&form.results);
        let _busy = self.busy(&form.submit);
        let dispatch = self.client.search_students(&query).await;
        let found: Vec<Student> = self
            .accept(&form.message, dispatch)
            .and_then(|data| self.decode(&form.message, data))
            .inspect_err(|_| page.clear_message(&form.results))?;

        match found.as_slice() {
            [] => {
                page.clear_message(&form.results);
                page.show_message(&form.message, NO_STUDENTS_FOUND, Severity::Info);
            }
            [student] => {
                page.render(&form.results, Fragment::StudentCard(StudentCard::from(student)));
            }
            many => {
                let links = many.iter().map(StudentLink::from).collect();
                page.render(&form.results, Fragment::StudentList(links));
            }
        }
        Ok(())
    }

    /// Load one student by id into the search results region.
    pub async fn show_student(&self, aluno_id: i64) -> Settled {
        settled(self.try_show_student(aluno_id).await)
    }

    async fn try_show_student(&self, aluno_id: i64) -> Result<(), Settled> {
        let form = &self.layout.search;
        self.page.clear_message(&form.message);
        self.page.show_loading(&form.results);
        let dispatch = self.client.student_by_id(aluno_id).await;
        let mut student: Student = self
            .accept(&form.message, dispatch)
            .and_then(|data| self.decode(&form.message, data))
            .inspect_err(|_| self.page.clear_message(&form.results))?;

        // The detail endpoint omits the id.
        if student.id.is_none() {
            student.id = Some(aluno_id);
        }
        self.page
            .render(&form.results, Fragment::StudentCard(StudentCard::from(&student)));
        Ok(())
    }
}
