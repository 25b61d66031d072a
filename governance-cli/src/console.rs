//! The interactive identity list and score band editor.

use std::io::Write;

use governance_lib::dto::BaseDto;
use governance_lib::dto::EditState;
use governance_lib::dto::ParentDto;
use governance_lib::paging::Filter;
use governance_lib::paging::Pager;
use governance_lib::paging::PagerState;
use governance_lib::paging::PagingConfig;
use governance_lib::paging::QueryingSource;
use governance_lib::session::SessionStore;
use log::info;

use crate::command::Command;
use crate::command::HELP;
use crate::error::ConsoleError;
use crate::seed;
use crate::seed::Identity;
use crate::seed::ScoreBand;

/// Session key for the identity list position.
pub const IDENTITY_VIEW: &str = "identities";

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console {
    pager: Pager<QueryingSource<Identity>>,
    bands: ParentDto<ScoreBand>,
    session: SessionStore,
    config: PagingConfig,
}

impl Console {
    pub fn new(
        pager: Pager<QueryingSource<Identity>>,
        bands: ParentDto<ScoreBand>,
        session: SessionStore,
        config: PagingConfig,
    ) -> Self {
        Self {
            pager,
            bands,
            session,
            config,
        }
    }

    pub fn pager(&self) -> &Pager<QueryingSource<Identity>> {
        &self.pager
    }

    pub fn bands(&self) -> &ParentDto<ScoreBand> {
        &self.bands
    }

    /// Puts the list back where the last session left it and loads the page.
    ///
    /// A saved page size is kept only within the configured limits; outside
    /// them it is clamped and the offset realigned to the new size.
    pub fn restore(&mut self) -> Result<(), ConsoleError> {
        if self.session.restore_pager(IDENTITY_VIEW, &mut self.pager)? {
            info!("Restored identity list at offset {}", self.pager.offset());
            let saved = self.pager.save_state();
            let page_size = self.config.result_limit(saved.page_size);
            if page_size != saved.page_size {
                let offset = saved.offset / page_size * page_size;
                self.pager.restore_state(PagerState::new(offset, page_size))?;
            }
        }
        // the table may have shrunk since the position was saved
        let page = self.pager.current_page();
        self.pager.set_current_page(page);
        self.pager.refresh()?;
        Ok(())
    }

    pub fn save(&self) -> Result<(), ConsoleError> {
        self.session.save_pager(IDENTITY_VIEW, &self.pager)?;
        Ok(())
    }

    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow, ConsoleError> {
        match command {
            Command::Next => {
                self.pager.next_page()?;
                self.print_page(out)?;
            }
            Command::Prev => {
                self.pager.prev_page()?;
                self.print_page(out)?;
            }
            Command::Page(page) => {
                self.pager.set_current_page(page);
                self.pager.refresh()?;
                self.print_page(out)?;
            }
            Command::Refresh => {
                self.pager.refresh()?;
                self.print_page(out)?;
            }
            Command::Reset => {
                self.pager.reset_offset();
                self.pager.refresh()?;
                self.print_page(out)?;
            }
            Command::Filter(text) => {
                self.apply_filter(&text)?;
                self.print_page(out)?;
            }
            Command::Json => {
                let rows = self.pager.source().rows().to_vec();
                writeln!(out, "{}", self.pager.list_result(rows).to_json()?)?;
            }
            Command::Bands => self.print_bands(out)?,
            Command::Select(uid) => {
                self.bands.set_selected_child_id(Some(uid));
                match self.bands.selected_child() {
                    Some(band) => writeln!(out, "Selected {}", band.label)?,
                    None => return Err(ConsoleError::NothingSelected),
                }
            }
            Command::Edit => {
                let band = self
                    .bands
                    .edit_child_action()
                    .ok_or(ConsoleError::NothingSelected)?;
                writeln!(out, "Editing {} (up to {})", band.label, band.upper)?;
            }
            Command::Rename(name) => {
                let band = self.bands.child_edit_mut().ok_or(ConsoleError::NotEditing)?;
                band.label = name;
                writeln!(out, "Renamed edit copy to {}", band.label)?;
            }
            Command::Save => {
                if self.bands.edit_state() == EditState::Idle {
                    return Err(ConsoleError::NotEditing);
                }
                self.bands.save_child_action();
                self.print_bands(out)?;
            }
            Command::Cancel => {
                self.bands.cancel_child_action();
                self.print_bands(out)?;
            }
            Command::Delete => {
                let band = self
                    .bands
                    .delete_child_action()
                    .ok_or(ConsoleError::NothingSelected)?;
                writeln!(out, "Deleted {}", band.label)?;
                self.bands.set_selected_child_id(None);
            }
            Command::Add(name) => {
                let upper = self.bands.children().last().map_or(250, |band| band.upper + 250);
                self.bands.add(ScoreBand::new(name, upper));
                self.print_bands(out)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn apply_filter(&mut self, text: &str) -> Result<(), ConsoleError> {
        let mut query = seed::identity_query();
        query.set_filter((!text.is_empty()).then(|| Filter::contains("name", text)));
        self.pager.source_mut().set_query(query)?;
        self.pager.reset_offset();
        self.pager.refresh()?;
        Ok(())
    }

    pub fn print_page(&self, out: &mut impl Write) -> Result<(), ConsoleError> {
        let pager = &self.pager;
        if pager.total() == 0 {
            writeln!(out, "No identities match")?;
            return Ok(());
        }
        for (i, identity) in pager.source().rows().iter().enumerate() {
            writeln!(
                out,
                "{:>4}  {:<24} {:<12}{}",
                pager.start_index() + i,
                identity.name,
                identity.department,
                if identity.manager { "  manager" } else { "" }
            )?;
        }
        if pager.is_paging_required() {
            writeln!(
                out,
                "{}-{} of {}, page {}/{}{}{}",
                pager.start_index(),
                pager.end_index(),
                pager.total(),
                pager.current_page(),
                pager.last_page(),
                if pager.has_prev() { "  [prev]" } else { "" },
                if pager.has_next() { "  [next]" } else { "" }
            )?;
        } else {
            writeln!(out, "{} identities", pager.total())?;
        }
        Ok(())
    }

    fn print_bands(&self, out: &mut impl Write) -> Result<(), ConsoleError> {
        let selected = self.bands.selected_child_id();
        for band in self.bands.children() {
            let marker = if Some(band.uid()) == selected { '*' } else { ' ' };
            writeln!(out, "{} {}  {:<12} {:>5}", marker, band.uid(), band.label, band.upper)?;
        }
        if let Some(edit) = self.bands.child_edit() {
            writeln!(out, "  editing: {} {:>5}", edit.label, edit.upper)?;
        }
        writeln!(out, "Bands: {}", self.bands.child_summary())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governance_lib::error::PagingError;
    use governance_lib::error::SessionError;
    use governance_lib::session::MemoryBackend;

    fn console(session: SessionStore) -> Console {
        let source =
            QueryingSource::new(seed::identities().unwrap(), seed::identity_query(), Identity::from_row).unwrap();
        let pager = Pager::new(10, source).unwrap();
        Console::new(
            pager,
            ParentDto::with_children(seed::score_bands()),
            session,
            PagingConfig::new().with_max_page_size(50),
        )
    }

    fn run(console: &mut Console, line: &str) -> Result<String, ConsoleError> {
        let mut out = Vec::new();
        console.execute(line.parse()?, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_paging_through_identities() {
        let mut console = console(SessionStore::new(MemoryBackend::new()));
        console.restore().unwrap();
        assert_eq!(console.pager().total(), 140);

        let out = run(&mut console, "next").unwrap();
        assert!(out.contains("11-20 of 140, page 2/14"));

        let out = run(&mut console, "page 99").unwrap();
        assert!(out.contains("131-140 of 140, page 14/14  [prev]"));

        assert!(matches!(
            run(&mut console, "next"),
            Err(ConsoleError::Paging(PagingError::NoNextPage { .. }))
        ));
    }

    #[test]
    fn test_filter_resets_to_first_page() {
        let mut console = console(SessionStore::new(MemoryBackend::new()));
        console.restore().unwrap();
        run(&mut console, "page 3").unwrap();

        let out = run(&mut console, "filter Kennedy").unwrap();
        assert_eq!(console.pager().offset(), 0);
        assert_eq!(console.pager().total(), 20);
        assert!(out.contains("1-10 of 20, page 1/2  [next]"));

        run(&mut console, "filter").unwrap();
        assert_eq!(console.pager().total(), 140);
    }

    #[test]
    fn test_json_matches_grid_shape() {
        let mut console = console(SessionStore::new(MemoryBackend::new()));
        console.restore().unwrap();
        run(&mut console, "filter Aaron.N").unwrap();

        let out = run(&mut console, "json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["totalCount"], 1);
        assert_eq!(value["objects"][0]["name"], "Aaron.Nichols");
    }

    #[test]
    fn test_position_survives_restart() {
        let session = SessionStore::new(MemoryBackend::new());
        let mut first = console(session.clone());
        first.restore().unwrap();
        run(&mut first, "page 5").unwrap();
        first.save().unwrap();

        let mut second = console(session);
        second.restore().unwrap();
        assert_eq!(second.pager().offset(), 40);
        assert_eq!(second.pager().source().rows().len(), 10);
    }

    #[test]
    fn test_restored_page_size_is_clamped() {
        let session = SessionStore::new(MemoryBackend::new());
        session
            .set("pager:identities", &PagerState::new(60, 10_000))
            .unwrap();

        let mut console = console(session);
        console.restore().unwrap();
        assert_eq!(console.pager().page_size(), 50);
        assert_eq!(console.pager().offset(), 50);
        assert_eq!(console.pager().source().rows().len(), 50);
    }

    #[test]
    fn test_corrupt_saved_position_is_rejected() {
        let session = SessionStore::new(MemoryBackend::new());
        session
            .set("pager:identities", &PagerState::new(usize::MAX, 1))
            .unwrap();

        let mut console = console(session);
        assert!(matches!(
            console.restore(),
            Err(ConsoleError::Session(SessionError::Paging(
                PagingError::StateOutOfRange { .. }
            )))
        ));
        assert_eq!(console.pager().offset(), 0);

        run(&mut console, "reset").unwrap();
        assert_eq!(console.pager().source().rows().len(), 10);
    }

    #[test]
    fn test_band_editing() {
        let mut console = console(SessionStore::new(MemoryBackend::new()));
        let high = console.bands().find_by_name("High").unwrap().uid();

        assert!(matches!(run(&mut console, "edit"), Err(ConsoleError::NothingSelected)));
        assert!(matches!(run(&mut console, "save"), Err(ConsoleError::NotEditing)));

        run(&mut console, &format!("select {}", high)).unwrap();
        run(&mut console, "edit").unwrap();
        run(&mut console, "rename Critical").unwrap();
        assert_eq!(console.bands().child_summary(), "Low, Medium Low, Medium High, High");

        let out = run(&mut console, "save").unwrap();
        assert!(out.contains("Bands: Low, Medium Low, Medium High, Critical"));

        run(&mut console, "edit").unwrap();
        run(&mut console, "rename Severe").unwrap();
        run(&mut console, "cancel").unwrap();
        assert_eq!(console.bands().selected_child().unwrap().label, "Critical");

        run(&mut console, "delete").unwrap();
        run(&mut console, "add Extreme").unwrap();
        assert_eq!(console.bands().child_summary(), "Low, Medium Low, Medium High, Extreme");
        assert_eq!(console.bands().children()[3].upper, 1000);
    }
}
