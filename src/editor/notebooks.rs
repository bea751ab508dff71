use crate::model::{Notebook, NotebookId, Page, PageId};
use crate::templates::Template;

use super::{Editor, Selection};

impl Editor {
    pub(super) fn add_notebook(&mut self) {
        if !self.is_idle() {
            self.ignored("add notebook");
            return;
        }
        let notebook_id = self.alloc.next_id();
        let page_id = self.alloc.next_id();
        let mut next = self.document().clone();
        next.notebooks.push(Notebook {
            id: notebook_id,
            name: format!("Notebook {}", next.notebooks.len() + 1),
            pages: vec![Page::new(page_id, "Page 1")],
        });
        self.commit(next);
        self.active_notebook = notebook_id;
        self.active_page = page_id;
        self.selection = Selection::None;
    }

    /// Appends a page built from `template` and makes it active.
    pub(super) fn add_page(&mut self, notebook: NotebookId, template: Template) {
        if !self.is_idle() {
            self.ignored("add page");
            return;
        }
        let Some(count) = self.document().notebook(notebook).map(|n| n.pages.len()) else {
            log::debug!("add page: unknown notebook {notebook}");
            return;
        };
        let page_id = self.alloc.next_id();
        let mut page = Page::new(page_id, format!("Page {}", count + 1));
        page.elements = self
            .templates
            .create_template_elements(template, &mut self.alloc);

        let mut next = self.document().clone();
        if let Some(n) = next.notebook_mut(notebook) {
            n.pages.push(page);
        }
        self.commit(next);
        self.active_notebook = notebook;
        self.active_page = page_id;
        self.selection = Selection::None;
    }

    /// Removes a page, and its notebook when that leaves it empty. The last
    /// page of the document is never removed. When the active page goes, the
    /// page before it in document order takes over, or the first page.
    pub(super) fn delete_page(&mut self, notebook: NotebookId, page: PageId) {
        if !self.is_idle() {
            self.ignored("delete page");
            return;
        }
        let doc = self.document();
        if doc.notebook_of_page(page) != Some(notebook) {
            log::debug!("delete page: {page} is not in notebook {notebook}");
            return;
        }
        if doc.page_count() <= 1 {
            log::debug!("delete page: refusing to remove the last page");
            return;
        }
        let flat = doc.flat_pages();
        let flat_index = flat.iter().position(|(_, p)| *p == page).unwrap_or(0);

        let mut next = doc.clone();
        if let Some(n) = next.notebook_mut(notebook) {
            n.pages.retain(|p| p.id != page);
        }
        next.notebooks.retain(|n| !n.pages.is_empty());

        if self.active_page == page {
            let remaining = next.flat_pages();
            let fallback = flat_index
                .checked_sub(1)
                .and_then(|i| remaining.get(i))
                .or_else(|| remaining.first())
                .copied();
            if let Some((n, p)) = fallback {
                self.active_notebook = n;
                self.active_page = p;
            }
        }
        if self.selection.page() == Some(page) {
            self.selection = Selection::None;
        }
        self.commit(next);
    }

    pub(super) fn select_page(&mut self, notebook: NotebookId, page: PageId) {
        if !self.is_idle() {
            self.ignored("select page");
            return;
        }
        if self.document().notebook_of_page(page) != Some(notebook) {
            log::debug!("select page: {page} is not in notebook {notebook}");
            return;
        }
        if self.active_page == page {
            return;
        }
        self.active_notebook = notebook;
        self.active_page = page;
        self.selection = Selection::None;
    }

    pub(super) fn rename_notebook(&mut self, notebook: NotebookId, name: String) {
        if !self.is_idle() {
            self.ignored("rename notebook");
            return;
        }
        let mut next = self.document().clone();
        let Some(n) = next.notebook_mut(notebook) else {
            log::debug!("rename: unknown notebook {notebook}");
            return;
        };
        n.name = name;
        self.commit(next);
    }

    pub(super) fn rename_page(&mut self, notebook: NotebookId, page: PageId, name: String) {
        if !self.is_idle() {
            self.ignored("rename page");
            return;
        }
        let mut next = self.document().clone();
        let Some(p) = next
            .notebook_mut(notebook)
            .and_then(|n| n.pages.iter_mut().find(|p| p.id == page))
        else {
            log::debug!("rename: no page {page} in notebook {notebook}");
            return;
        };
        p.name = name;
        self.commit(next);
    }
}

#[cfg(test)]
#[path = "notebooks_test.rs"]
mod tests;
