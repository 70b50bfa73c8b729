//! Local input checks. No backend involved.

use serde::Serialize;

use pgs_core::validate::{mask_phone, validate_cpf, validate_email, validate_phone};

use crate::cli::{GlobalOpts, ValidateArgs, ValidateCommand};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct Verdict {
    check: &'static str,
    value: String,
    valid: bool,
}

#[derive(Debug, Serialize)]
struct Masked {
    value: String,
    masked: String,
}

fn check(
    kind: &'static str,
    label: &str,
    value: String,
    valid: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let verdict = Verdict {
        check: kind,
        value,
        valid,
    };
    let out = output::render_single(
        global.output(),
        &verdict,
        |v| {
            if v.valid {
                format!("✓ {label} válido: {}", v.value)
            } else {
                format!("✗ {label} inválido: {}", v.value)
            }
        },
        |v| v.valid.to_string(),
    )?;
    output::print_output(&out, global.quiet);

    if verdict.valid {
        Ok(())
    } else {
        Err(CliError::Validation {
            field: kind.into(),
            reason: format!("'{}' is not a valid {label}", verdict.value),
        })
    }
}

pub fn handle(args: ValidateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ValidateCommand::Cpf { value } => {
            let valid = validate_cpf(&value);
            check("cpf", "CPF", value, valid, global)
        }
        ValidateCommand::Email { value } => {
            let valid = validate_email(&value);
            check("email", "E-mail", value, valid, global)
        }
        ValidateCommand::Phone { value } => {
            let valid = validate_phone(&value);
            check("phone", "Telefone", value, valid, global)
        }
        ValidateCommand::MaskPhone { value } => {
            let masked = Masked {
                masked: mask_phone(&value),
                value,
            };
            let out = output::render_single(
                global.output(),
                &masked,
                |m| m.masked.clone(),
                |m| m.masked.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
