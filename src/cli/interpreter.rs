use super::command::Command;
use super::prompt::read_vehicle_data;
use super::source::{LineSource, ReaderSource};
use crate::config::ShellConfig;
use crate::core::{Result, ShellError, VehicleData};
use crate::storage::codec::HEADER_FORMAT;
use crate::storage::{DataFile, VehicleCollection};
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// What the session should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Executes commands against one collection.
///
/// Every command either completes or fails as a whole: failures are caught
/// in [`CommandInterpreter::execute_line`], printed, and the session goes
/// on with the collection exactly as it was before the command.
pub struct CommandInterpreter<W: Write> {
    collection: VehicleCollection,
    data_file: DataFile,
    out: W,
    max_script_depth: usize,
    script_depth: usize,
}

impl<W: Write> CommandInterpreter<W> {
    pub fn new(config: &ShellConfig, collection: VehicleCollection, out: W) -> Self {
        Self {
            collection,
            data_file: DataFile::new(&config.data_file),
            out,
            max_script_depth: config.max_script_depth,
            script_depth: 0,
        }
    }

    pub fn collection(&self) -> &VehicleCollection {
        &self.collection
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Drive a read-dispatch loop over `source` until `exit` or end of input.
    ///
    /// Only a failure to read from `source` itself is returned as an error.
    pub fn run(&mut self, source: &mut dyn LineSource) -> Result<Flow> {
        loop {
            if source.is_interactive() {
                writeln!(self.out, "Enter a command:")?;
                self.out.flush()?;
            }
            let Some(line) = source.next_line()? else {
                return Ok(Flow::Continue);
            };
            if !source.is_interactive() {
                debug!(source = source.name(), line = %line, "script command");
            }
            if self.execute_line(&line, source) == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    /// Parse and run one command line; `source` feeds any extra lines it needs.
    pub fn execute_line(&mut self, line: &str, source: &mut dyn LineSource) -> Flow {
        let result = Command::parse(line).and_then(|command| match command {
            Some(command) => self.dispatch(command, source),
            None => Ok(Flow::Continue),
        });

        let flow = match result {
            Ok(flow) => flow,
            Err(err) => {
                self.report(&err);
                Flow::Continue
            }
        };
        if let Err(e) = self.out.flush() {
            error!(error = %e, "failed to flush output");
        }
        flow
    }

    pub fn dispatch(&mut self, command: Command, source: &mut dyn LineSource) -> Result<Flow> {
        match command {
            Command::Help => self.help()?,
            Command::Info => self.info()?,
            Command::Show => self.show()?,
            Command::Add => self.add(source)?,
            Command::Update(id) => self.update(id, source)?,
            Command::RemoveById(id) => self.remove_by_id(id)?,
            Command::Clear => self.clear()?,
            Command::Save => self.save()?,
            Command::ExecuteScript(path) => return self.execute_script(&path),
            Command::Exit => return Ok(Flow::Exit),
            Command::AddIfMax => self.add_if_max(source)?,
            Command::AddIfMin => self.add_if_min(source)?,
            Command::RemoveLower => self.remove_lower(source)?,
            Command::GroupCountingByEnginePower => self.group_counting_by_engine_power()?,
            Command::FilterByNumberOfWheels(wheels) => self.filter_by_number_of_wheels(wheels)?,
            Command::PrintFieldAscendingNumberOfWheels => {
                self.print_field_ascending_number_of_wheels()?
            }
        }
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: &ShellError) {
        warn!(error = %err, "command failed");
        let written = match err {
            ShellError::UnknownCommand(_) => writeln!(self.out, "{}", err),
            _ => writeln!(
                self.out,
                "Error: {}\nYou can retry the command or leave with exit.",
                err
            ),
        };
        if let Err(e) = written {
            error!(error = %e, "failed to report command error");
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    fn help(&mut self) -> Result<()> {
        write!(self.out, "{}", Command::help_text())?;
        Ok(())
    }

    fn info(&mut self) -> Result<()> {
        writeln!(self.out, "Collection type: ordered set (BTreeSet<Vehicle>)")?;
        writeln!(
            self.out,
            "Initialization date: {}",
            self.collection.init_date().format(HEADER_FORMAT)
        )?;
        writeln!(self.out, "Number of elements: {}", self.collection.len())?;
        writeln!(self.out, "Next id: {}", self.collection.peek_next_id())?;
        writeln!(self.out, "Data file: {}", self.data_file.path().display())?;
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        if self.collection.is_empty() {
            writeln!(self.out, "Collection is empty.")?;
            return Ok(());
        }
        for vehicle in &self.collection {
            writeln!(self.out, "{}", vehicle)?;
        }
        Ok(())
    }

    fn group_counting_by_engine_power(&mut self) -> Result<()> {
        let groups = self.collection.group_by_engine_power();
        if groups.is_empty() {
            writeln!(self.out, "Collection is empty.")?;
        }
        for (power, count) in groups {
            writeln!(self.out, "Engine power: {}, count: {}", power, count)?;
        }
        Ok(())
    }

    fn filter_by_number_of_wheels(&mut self, wheels: i64) -> Result<()> {
        let matching = self.collection.filter_by_wheel_count(wheels);
        if matching.is_empty() {
            writeln!(self.out, "No elements with {} wheels.", wheels)?;
        }
        for vehicle in matching {
            writeln!(self.out, "{}", vehicle)?;
        }
        Ok(())
    }

    fn print_field_ascending_number_of_wheels(&mut self) -> Result<()> {
        for wheels in self.collection.ascending_wheel_counts() {
            writeln!(self.out, "{}", wheels)?;
        }
        Ok(())
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    fn add(&mut self, source: &mut dyn LineSource) -> Result<()> {
        let data = read_vehicle_data(source, &mut self.out)?;
        let id = self.collection.add(data)?;
        writeln!(self.out, "Element added with id {}.", id)?;
        Ok(())
    }

    fn update(&mut self, id: i64, source: &mut dyn LineSource) -> Result<()> {
        if self.collection.find_by_id(id).is_none() {
            return Err(ShellError::NotFound(id));
        }
        // the old element stays in place until the new one is fully built
        let data = read_vehicle_data(source, &mut self.out)?;
        self.collection.replace(id, data)?;
        writeln!(self.out, "Element {} updated.", id)?;
        Ok(())
    }

    fn remove_by_id(&mut self, id: i64) -> Result<()> {
        self.collection.remove_by_id(id)?;
        writeln!(self.out, "Element removed.")?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.collection.clear();
        writeln!(self.out, "Collection cleared.")?;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.data_file.save(&self.collection)?;
        writeln!(
            self.out,
            "Collection saved to {}.",
            self.data_file.path().display()
        )?;
        Ok(())
    }

    fn add_if_max(&mut self, source: &mut dyn LineSource) -> Result<()> {
        let data = read_vehicle_data(source, &mut self.out)?;
        let accepted = match self.collection.max() {
            Some(max) => data > *max.data(),
            None => true,
        };
        self.add_if(accepted, data)
    }

    fn add_if_min(&mut self, source: &mut dyn LineSource) -> Result<()> {
        let data = read_vehicle_data(source, &mut self.out)?;
        let accepted = match self.collection.min() {
            Some(min) => data < *min.data(),
            None => true,
        };
        self.add_if(accepted, data)
    }

    fn add_if(&mut self, accepted: bool, data: VehicleData) -> Result<()> {
        if accepted {
            self.collection.add(data)?;
            writeln!(self.out, "Element added to the collection.")?;
        } else {
            writeln!(self.out, "Element not added to the collection.")?;
        }
        Ok(())
    }

    fn remove_lower(&mut self, source: &mut dyn LineSource) -> Result<()> {
        let data = read_vehicle_data(source, &mut self.out)?;
        let removed = self.collection.remove_matching(|v| *v.data() < data);
        writeln!(self.out, "Removed {} element(s).", removed)?;
        Ok(())
    }

    // ========================================================================
    // Scripts
    // ========================================================================

    /// Replay the commands of `path` as if they were typed.
    ///
    /// Commands in the script read their extra lines from the script. Nesting
    /// deeper than the configured limit fails with [`ShellError::ScriptDepth`].
    fn execute_script(&mut self, path: &Path) -> Result<Flow> {
        if self.script_depth >= self.max_script_depth {
            return Err(ShellError::ScriptDepth(self.max_script_depth));
        }
        let mut script = ReaderSource::open_script(path)?;

        self.script_depth += 1;
        info!(script = %path.display(), depth = self.script_depth, "executing script");
        let result = self.run(&mut script);
        self.script_depth -= 1;

        debug!(script = %path.display(), lines = script.lines_read(), "script finished");
        result
    }
}
