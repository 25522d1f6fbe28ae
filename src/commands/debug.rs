//! # Debug Command Implementation
//!
//! Dumps the resolved runtime paths, the compiled-in thresholds and, when the
//! monorepo exists, the root document and every discovered module.

use anyhow::Result;

use gorepo::context::Context;
use gorepo::logger::Logger;

const RULE: &str = "===================";

fn section(logger: &Logger, title: &str) {
    logger.info(RULE);
    logger.info(title);
    logger.info(RULE);
}

/// Execute the `debug` command.
pub fn execute(ctx: &Context) -> Result<()> {
    let logger = &ctx.logger;
    let runtime = ctx.resolver.runtime();
    let statics = ctx.resolver.statics();
    let exists = ctx.resolver.root_config_exists();

    section(logger, "RUNTIME_CONFIG");
    logger.default_ln(format!(
        "WD (COMMAND RAN FROM)........{}",
        runtime.working_dir.display()
    ));
    logger.default_ln(format!(
        "ROOT (OF THE MONOREPO).......{}",
        runtime.root.display()
    ));
    logger.default_ln(format!("MONOREPO EXISTS (AT ROOT)....{exists}"));

    section(logger, "STATIC_CONFIG");
    logger.default_ln(format!("MAX RECURSION................{}", statics.max_recursion));
    logger.default_ln(format!("ROOT FILE NAME...............{}", statics.root_file_name));
    logger.default_ln(format!("MODULE FILE NAME.............{}", statics.module_file_name));

    if !exists {
        return Ok(());
    }

    let root = ctx.resolver.load_root_config()?;
    section(logger, "ROOT_CONFIG");
    logger.default_ln(format!("NAME..........{}", root.name));
    logger.default_ln(format!("VERSION.......{}", root.version));
    logger.default_ln(format!("STRATEGY......{}", root.strategy));
    logger.default_ln(format!("VENDOR........{}", root.vendor));
    if !root.scripts.is_empty() {
        logger.default_ln("SCRIPTS........");
        for (name, body) in &root.scripts {
            logger.default_ln(format!("  {name} -> {body}"));
        }
    }

    let modules = ctx.resolver.discover_modules(logger)?;
    logger.default_ln(format!("N_MODULES.....{}", modules.len()));

    if !modules.is_empty() {
        section(logger, "MODULES_CONFIG");
    }
    for module in &modules {
        logger.info(format!("MODULE {}", module.name));
        logger.default_ln(format!("MODULE_NAME........ {}", module.name));
        logger.default_ln(format!(
            "MODULE_PATH........ {}",
            module.relative_path.display()
        ));
        if !module.scripts.is_empty() {
            logger.default_ln("COMMANDS........");
            for (name, body) in &module.scripts {
                logger.default_ln(format!("  {name} -> {body}"));
            }
        }
    }
    Ok(())
}
