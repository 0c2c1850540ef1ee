//! Top-level conversion operations
//!
//! Each operation opens a [`Session`] on the caller's source (initialize,
//! search paths, load), runs one stage, and tears the source down again before
//! returning. With `strict` set, results carrying diagnostics become errors.

use crate::assemble::{Assembled, assemble_module};
use crate::compose::{Composition, CompositionStatus, compose};
use crate::config::OmfConfig;
use crate::diagnostics::Diagnostics;
use crate::error::{OmfError, Result};
use crate::session::Session;
use crate::source::MibSource;
use crate::tree::{TreeOutcome, build_module_tree};
use tracing::info;

/// Load `name` and assemble its bucketed module view.
pub fn convert_module<S>(source: &mut S, name: &str, config: &OmfConfig) -> Result<Assembled>
where
    S: MibSource + ?Sized,
{
    config.validate()?;
    let mut session = Session::open(source, config.search_paths.as_slice())?;
    let module = session.load(name)?;
    let assembled = assemble_module(module, &config.assemble_options());

    reject_if_strict(config, name, &assembled.diagnostics)?;
    Ok(assembled)
}

/// Load `name` and build its single-root tree.
pub fn convert_module_tree<S>(source: &mut S, name: &str, config: &OmfConfig) -> Result<TreeOutcome>
where
    S: MibSource + ?Sized,
{
    config.validate()?;
    let mut session = Session::open(source, config.search_paths.as_slice())?;
    session.load(name)?;
    let outcome = build_module_tree(session.source(), name, &config.tree_options())?;

    reject_if_strict(config, name, &outcome.diagnostics)?;
    Ok(outcome)
}

/// Load `name`, resolve its imports and compose the forest of every module in
/// scope.
pub fn convert_complete_tree<S>(source: &mut S, name: &str, config: &OmfConfig) -> Result<Composition>
where
    S: MibSource + ?Sized,
{
    config.validate()?;
    let mut session = Session::open(source, config.search_paths.as_slice())?;
    session.load(name)?;
    let composition = compose(session.source_mut(), name, &config.compose_options())?;

    if config.strict {
        if let CompositionStatus::Partial {
            failed_import,
            reason,
            ..
        } = &composition.status
        {
            return Err(OmfError::ImportFailed {
                module: name.to_string(),
                import: failed_import.clone(),
                reason: reason.clone(),
            });
        }
    }
    reject_if_strict(config, name, &composition.diagnostics)?;
    Ok(composition)
}

fn reject_if_strict(config: &OmfConfig, module: &str, diagnostics: &Diagnostics) -> Result<()> {
    if config.strict && !diagnostics.is_empty() {
        info!("Rejecting {} in strict mode", module);
        return Err(OmfError::Rejected {
            module: module.to_string(),
            diagnostics: diagnostics.iter().cloned().collect(),
        });
    }
    Ok(())
}
