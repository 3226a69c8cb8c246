//! Command-line surface of the layout inspector.

use crate::settings;

use anyhow::{Context, Result, anyhow, bail};
use std::path::PathBuf;
use workbench_layout::{LayoutSettings, LayoutTree, NoActivationHistory, Region};

pub const USAGE: &str = "\
usage: workbench [--settings PATH] <command>

commands:
  show [TOKEN]                     print the layout outline
  apply TOKEN OP [ARGS...]         apply one edit and print the new token
  settings                         print the effective settings
  init-settings                    write default settings to the settings path

ops:
  add-view PART VIEW [INDEX]
  move-view VIEW PART [INDEX]
  remove-view VIEW
  activate PART VIEW
  activate-sibling PART VIEW
  resize SASH RATIO
  split REGION ANCHOR [NEW_PART]
  drop VIEW REGION ANCHOR
  remove-part PART
";

/// A single grid edit requested on the command line.
#[derive(Clone, Debug, PartialEq)]
pub enum Edit {
    AddView { part_id: String, view_id: String, index: Option<usize> },
    MoveView { view_id: String, part_id: String, index: Option<usize> },
    RemoveView { view_id: String },
    Activate { part_id: String, view_id: String },
    ActivateSibling { part_id: String, view_id: String },
    Resize { sash_id: u32, ratio: f64 },
    Split { region: Region, anchor: String, new_part_id: Option<String> },
    Drop { view_id: String, region: Region, anchor: String },
    RemovePart { part_id: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Show { token: String },
    Apply { token: String, edit: Edit },
    Settings,
    InitSettings,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    pub settings_path: Option<PathBuf>,
    pub command: Command,
}

impl Invocation {
    pub fn settings_path(&self) -> PathBuf {
        self.settings_path.clone().unwrap_or_else(settings::get_settings_path)
    }
}

pub fn parse_args<I>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = String>,
{
    let mut args: Vec<String> = args.into_iter().collect();
    let mut settings_path = None;
    if args.first().map(String::as_str) == Some("--settings") {
        if args.len() < 2 {
            bail!("--settings needs a path\n\n{}", USAGE);
        }
        settings_path = Some(PathBuf::from(args.remove(1)));
        args.remove(0);
    }

    let Some((command, rest)) = args.split_first() else {
        bail!("missing command\n\n{}", USAGE);
    };
    let command = match command.as_str() {
        "show" => Command::Show { token: rest.first().cloned().unwrap_or_default() },
        "apply" => {
            let Some((token, op)) = rest.split_first() else {
                bail!("apply needs a token and an op\n\n{}", USAGE);
            };
            Command::Apply { token: token.clone(), edit: parse_edit(op)? }
        }
        "settings" => Command::Settings,
        "init-settings" => Command::InitSettings,
        other => bail!("unknown command `{}`\n\n{}", other, USAGE),
    };
    Ok(Invocation { settings_path, command })
}

fn parse_edit(args: &[String]) -> Result<Edit> {
    let arg = |i: usize| -> Result<String> {
        args.get(i)
            .cloned()
            .ok_or_else(|| anyhow!("missing argument {} for `{}`", i, args.first().map(String::as_str).unwrap_or("op")))
    };
    let optional_index = |i: usize| -> Result<Option<usize>> {
        args.get(i)
            .map(|raw| raw.parse::<usize>().with_context(|| format!("invalid index `{}`", raw)))
            .transpose()
    };
    let region = |i: usize| -> Result<Region> {
        let raw = arg(i)?;
        Region::from_name(&raw).ok_or_else(|| anyhow!("invalid region `{}` (north, south, east, west)", raw))
    };

    let op = arg(0)?;
    let edit = match op.as_str() {
        "add-view" => Edit::AddView { part_id: arg(1)?, view_id: arg(2)?, index: optional_index(3)? },
        "move-view" => Edit::MoveView { view_id: arg(1)?, part_id: arg(2)?, index: optional_index(3)? },
        "remove-view" => Edit::RemoveView { view_id: arg(1)? },
        "activate" => Edit::Activate { part_id: arg(1)?, view_id: arg(2)? },
        "activate-sibling" => Edit::ActivateSibling { part_id: arg(1)?, view_id: arg(2)? },
        "resize" => {
            let sash = arg(1)?;
            let ratio = arg(2)?;
            Edit::Resize {
                sash_id: sash.parse().with_context(|| format!("invalid sash id `{}`", sash))?,
                ratio: ratio.parse().with_context(|| format!("invalid ratio `{}`", ratio))?,
            }
        }
        "split" => Edit::Split { region: region(1)?, anchor: arg(2)?, new_part_id: args.get(3).cloned() },
        "drop" => Edit::Drop { view_id: arg(1)?, region: region(2)?, anchor: arg(3)? },
        "remove-part" => Edit::RemovePart { part_id: arg(1)? },
        other => bail!("unknown op `{}`\n\n{}", other, USAGE),
    };
    Ok(edit)
}

/// Apply an edit. The inspector keeps no activation history, so closing an
/// active tab falls back to the first remaining tab.
pub fn apply_edit(tree: &LayoutTree, edit: &Edit, settings: &LayoutSettings) -> Result<LayoutTree> {
    let registry = NoActivationHistory;
    let next = match edit {
        Edit::AddView { part_id, view_id, index } => tree.add_view(part_id, view_id, *index)?,
        Edit::MoveView { view_id, part_id, index } => tree.move_view(view_id, part_id, *index, &registry)?,
        Edit::RemoveView { view_id } => tree.remove_view(view_id, &registry)?,
        Edit::Activate { part_id, view_id } => tree.activate_view(part_id, view_id)?,
        Edit::ActivateSibling { part_id, view_id } => tree.activate_sibling_view(part_id, view_id)?,
        Edit::Resize { sash_id, ratio } => tree.split_position(*sash_id, *ratio)?,
        Edit::Split { region, anchor, new_part_id: Some(new_part_id) } => {
            tree.add_sibling_part(*region, anchor, new_part_id)?
        }
        Edit::Split { region, anchor, new_part_id: None } => {
            let (next, new_part_id) = tree.add_sibling_part_auto(*region, anchor, settings)?;
            log::info!("Created part {}", new_part_id);
            next
        }
        Edit::Drop { view_id, region, anchor } => {
            let (next, new_part_id) = tree.move_view_to_new_part(view_id, *region, anchor, &registry, settings)?;
            log::info!("Moved {} into new part {}", view_id, new_part_id);
            next
        }
        Edit::RemovePart { part_id } => tree.remove_part(part_id)?,
    };
    Ok(next)
}

/// Run a command and return what should be printed.
pub fn run(invocation: &Invocation, settings: &LayoutSettings) -> Result<String> {
    match &invocation.command {
        Command::Show { token } => {
            let tree = workbench_layout::deserialize_with(token, settings).context("Failed to decode layout")?;
            Ok(tree.outline())
        }
        Command::Apply { token, edit } => {
            let tree = workbench_layout::deserialize_with(token, settings).context("Failed to decode layout")?;
            let next = apply_edit(&tree, edit, settings)?;
            let token = workbench_layout::serialize(&next)?;
            Ok(format!("{}\n", token))
        }
        Command::Settings => Ok(format!("{}\n", serde_json::to_string_pretty(settings)?)),
        Command::InitSettings => {
            let path = invocation.settings_path();
            settings::save_settings(&path, &LayoutSettings::default())
                .with_context(|| format!("Failed to write settings to {}", path.display()))?;
            Ok(format!("wrote {}\n", path.display()))
        }
    }
}
