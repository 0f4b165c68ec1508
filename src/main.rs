use std::env;

use recipe_forge::{RecipeGenerator, RecipeRequest};

const USAGE: &str = "Usage: recipe-forge <ingredients> [--cuisine CUISINE] [--meal-type TYPE] \
[--dietary TAG,TAG] [--instructions TEXT] [--fallback]";

fn parse_args(args: &[String]) -> Result<RecipeRequest, String> {
    let mut request: Option<RecipeRequest> = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--cuisine" | "--meal-type" | "--dietary" | "--instructions" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("{} requires a value", arg))?;
                let request = request
                    .as_mut()
                    .ok_or_else(|| "ingredients must come first".to_string())?;
                match arg.as_str() {
                    "--cuisine" => request.cuisine = Some(value.clone()),
                    "--meal-type" => request.meal_type = Some(value.clone()),
                    "--dietary" => {
                        request.dietary = value
                            .split(',')
                            .map(str::trim)
                            .filter(|t| !t.is_empty())
                            .map(String::from)
                            .collect();
                    }
                    _ => request.additional_instructions = Some(value.clone()),
                }
            }
            "--fallback" => {
                let request = request
                    .as_mut()
                    .ok_or_else(|| "ingredients must come first".to_string())?;
                request.force_fallback = true;
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option: {}", other));
            }
            ingredients => {
                if request.is_some() {
                    return Err("ingredients given twice".to_string());
                }
                request = Some(RecipeRequest::new(ingredients));
            }
        }
    }

    request.ok_or_else(|| USAGE.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let request = parse_args(&args)?;

    let generator = RecipeGenerator::builder().build()?;
    let generated = generator.generate(&request).await;

    if generated.source.is_fallback() && !request.force_fallback {
        eprintln!("Note: remote generation was unavailable; this recipe was generated locally.");
    }

    println!("{}", serde_json::to_string_pretty(&generated.recipe)?);
    Ok(())
}
