use crate::core::catalog::CourseCatalog;
use crate::core::loader::CourseLoader;
use crate::core::report;
use crate::domain::ports::Storage;
use crate::utils::error::{PlannerError, Result};
use std::io::{BufRead, Write};

const MENU: &str = "\n===== Course Planner =====\n  \
                    1. Load course data\n  \
                    2. Print course list (alphanumeric)\n  \
                    3. Print course info (title + prerequisites)\n  \
                    9. Exit\n\
                    Choose an option: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Load,
    List,
    Describe,
    Exit,
}

impl MenuChoice {
    /// Only plain digit strings are accepted; anything else is an invalid
    /// selection.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let invalid = || PlannerError::InvalidSelectionError {
            input: input.to_string(),
        };

        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        match input.parse::<u32>().map_err(|_| invalid())? {
            1 => Ok(MenuChoice::Load),
            2 => Ok(MenuChoice::List),
            3 => Ok(MenuChoice::Describe),
            9 => Ok(MenuChoice::Exit),
            _ => Err(invalid()),
        }
    }
}

/// Menu-driven session over one catalog. The shell owns the catalog for
/// its whole lifetime; loads replace its contents wholesale.
pub struct Shell<S: Storage> {
    loader: CourseLoader<S>,
    catalog: CourseCatalog,
    unresolved_marker: Option<String>,
    data_loaded: bool,
}

impl<S: Storage> Shell<S> {
    pub fn new(loader: CourseLoader<S>, catalog: CourseCatalog) -> Self {
        Self {
            loader,
            catalog,
            unresolved_marker: None,
            data_loaded: false,
        }
    }

    pub fn with_unresolved_marker(mut self, marker: Option<String>) -> Self {
        self.unresolved_marker = marker;
        self
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    pub fn is_data_loaded(&self) -> bool {
        self.data_loaded
    }

    /// Runs until option 9 or end of input. Only write failures on `out`
    /// or `err` are returned; everything else is reported and the loop
    /// carries on.
    pub fn run<R, W, E>(&mut self, mut input: R, mut out: W, mut err: E) -> Result<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        loop {
            write!(out, "{}", MENU)?;
            out.flush()?;

            let Some(line) = read_trimmed_line(&mut input)? else {
                break;
            };

            let choice = match MenuChoice::parse(&line) {
                Ok(choice) => choice,
                Err(e) => {
                    writeln!(err, "{}", e.user_friendly_message())?;
                    continue;
                }
            };
            tracing::debug!("Menu choice: {:?}", choice);

            match choice {
                MenuChoice::Load => {
                    write!(out, "Enter course data filename (CSV): ")?;
                    out.flush()?;
                    let Some(filename) = read_trimmed_line(&mut input)? else {
                        writeln!(err, "Error reading filename.")?;
                        break;
                    };
                    if filename.is_empty() {
                        writeln!(err, "Error: Filename cannot be empty.")?;
                        continue;
                    }
                    self.load(&filename, &mut out, &mut err)?;
                }
                MenuChoice::List => {
                    if !self.data_loaded {
                        writeln!(err, "Error: Load data first (option 1).")?;
                        continue;
                    }
                    self.print_list(&mut out, &mut err)?;
                }
                MenuChoice::Describe => {
                    if !self.data_loaded {
                        writeln!(err, "Error: Load data first (option 1).")?;
                        continue;
                    }
                    write!(out, "Enter a course number (e.g., CSCI200): ")?;
                    out.flush()?;
                    let Some(id) = read_trimmed_line(&mut input)? else {
                        writeln!(err, "Error reading course number.")?;
                        break;
                    };
                    self.print_course(&id, &mut out, &mut err)?;
                }
                MenuChoice::Exit => {
                    writeln!(out, "Goodbye!")?;
                    return Ok(());
                }
            }
        }

        tracing::debug!("Input closed, leaving shell");
        Ok(())
    }

    /// Loads `path` into the catalog. A file that cannot be read is
    /// reported and the previous catalog stays in place.
    pub fn load<W: Write, E: Write>(&mut self, path: &str, out: &mut W, err: &mut E) -> Result<()> {
        match self.loader.load_into(path, &mut self.catalog) {
            Ok(report) => {
                for diagnostic in &report.diagnostics {
                    writeln!(err, "Warning: {}", diagnostic)?;
                }
                writeln!(
                    out,
                    "Loaded {} course(s) from \"{}\".",
                    report.course_count, path
                )?;
                self.data_loaded = true;
            }
            Err(e) => {
                tracing::debug!("Load failed: {}", e);
                writeln!(err, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    fn print_list<W: Write, E: Write>(&self, out: &mut W, err: &mut E) -> Result<()> {
        match report::list_sorted(&self.catalog) {
            Ok(summaries) => writeln!(out, "{}", report::render_listing(&summaries))?,
            Err(e) => writeln!(err, "Error: {}", e.user_friendly_message())?,
        }
        Ok(())
    }

    fn print_course<W: Write, E: Write>(&self, id: &str, out: &mut W, err: &mut E) -> Result<()> {
        match report::describe_course(&self.catalog, id) {
            Ok(description) => writeln!(
                out,
                "{}",
                description.render(self.unresolved_marker.as_deref())
            )?,
            Err(e) => writeln!(err, "Error: {}", e.user_friendly_message())?,
        }
        Ok(())
    }
}

fn read_trimmed_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
