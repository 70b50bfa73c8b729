// Module create/delete/list and membership.

use pgs_api::{Module, ModuleMember};
use tracing::info;

use super::{Sections, Settled, View, settled};
use crate::view::{Fragment, MemberRow, ModuleTile, Severity};

const NAME_REQUIRED: &str = "Por favor, informe o nome do módulo.";
const NO_MODULES: &str = "Nenhum módulo cadastrado.";
const NO_MEMBERS: &str = "Nenhum aluno encontrado neste módulo.";

impl Sections {
    /// Create a module from the create form. A page listing modules
    /// refreshes the listing after the refresh delay.
    pub async fn create_module(&self) -> Settled {
        settled(self.try_create_module().await)
    }

    async fn try_create_module(&self) -> Result<(), Settled> {
        let form = &self.layout.create_module;
        let nome = self.page.field(&form.field).trim().to_owned();
        if nome.is_empty() {
            return Err(self.invalid(&form.message, NAME_REQUIRED));
        }

        self.page.clear_message(&form.message);
        let _busy = self.busy(&form.submit);
        let dispatch = self.client.create_module(&nome).await;
        let data = self.accept(&form.message, dispatch)?;

        info!(%nome, "module created");
        self.confirm(&form.message, &data);
        self.page.clear_fields([form.field.as_str()]);

        let refresh = self.layout.view == View::Modules;
        self.after_create(form.modal.as_deref(), move |sections| async move {
            if refresh {
                sections.list_modules().await;
            }
        });
        Ok(())
    }

    /// Delete the module named in the delete form.
    pub async fn delete_module(&self) -> Settled {
        settled(self.try_delete_module().await)
    }

    async fn try_delete_module(&self) -> Result<(), Settled> {
        let form = &self.layout.delete_module;
        let nome = self.page.field(&form.field).trim().to_owned();
        if nome.is_empty() {
            return Err(self.invalid(&form.message, NAME_REQUIRED));
        }

        self.page.clear_message(&form.message);
        let busy = self.busy(&form.submit);
        let dispatch = self.client.delete_module(&nome).await;
        let data = self.accept(&form.message, dispatch)?;
        drop(busy);

        info!(%nome, "module deleted");
        self.confirm(&form.message, &data);
        self.page.clear_fields([form.field.as_str()]);
        if self.layout.view == View::Modules {
            self.list_modules().await;
        }
        Ok(())
    }

    /// Render every module as a tile.
    pub async fn list_modules(&self) -> Settled {
        settled(self.try_list_modules().await)
    }

    async fn try_list_modules(&self) -> Result<(), Settled> {
        let region = self.layout.modules.as_str();
        self.page.show_loading(region);
        let dispatch = self.client.list_modules().await;
        let modules: Vec<Module> = self
            .accept(region, dispatch)
            .and_then(|data| self.decode(region, data))
            .inspect_err(|settled| self.clear_if_dropped(region, settled))?;

        if modules.is_empty() {
            self.page.show_message(region, NO_MODULES, Severity::Info);
        } else {
            let tiles = modules.iter().map(ModuleTile::from).collect();
            self.page.render(region, Fragment::ModuleList(tiles));
        }
        Ok(())
    }

    /// Render the membership table of one module, banding each row by
    /// final grade.
    pub async fn list_module_members(&self, module_id: i64) -> Settled {
        settled(self.try_list_module_members(module_id).await)
    }

    async fn try_list_module_members(&self, module_id: i64) -> Result<(), Settled> {
        let region = self.layout.members.as_str();
        self.page.show_loading(region);
        let dispatch = self.client.module_members(module_id).await;
        let members: Vec<ModuleMember> = self
            .accept(region, dispatch)
            .and_then(|data| self.decode(region, data))
            .inspect_err(|settled| self.clear_if_dropped(region, settled))?;

        if members.is_empty() {
            self.page.show_message(region, NO_MEMBERS, Severity::Info);
        } else {
            let rows = members
                .iter()
                .map(|m| MemberRow::new(module_id, m))
                .collect();
            self.page.render(region, Fragment::MemberTable(rows));
        }
        Ok(())
    }
}
