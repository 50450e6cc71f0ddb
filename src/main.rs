use quiz_generator::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult, ErrorResponse},
};

const USAGE: &str = "usage: quiz-generator <question-count> <types> <topics>";

fn parse_args(args: &[String]) -> AppResult<(u32, String, String)> {
    let [count, types, topics] = args else {
        return Err(AppError::ValidationError(USAGE.to_string()));
    };

    let count = count.parse::<u32>().map_err(|_| {
        AppError::ValidationError(format!("question count must be a positive integer, got '{}'", count))
    })?;

    Ok((count, types.clone(), topics.clone()))
}

async fn run(args: &[String]) -> AppResult<String> {
    let (count, types, topics) = parse_args(args)?;

    let config = Config::from_env();
    let state = AppState::new(config).await?;

    let quiz = state
        .quiz_generation_service
        .generate_quiz(count, &types, &topics)
        .await?;

    Ok(serde_json::to_string_pretty(&quiz)?)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(&args).await {
        Ok(body) => println!("{}", body),
        Err(err) => {
            log::error!("Quiz generation failed: {}", err);
            let response = ErrorResponse::from(&err);
            if let Ok(body) = serde_json::to_string_pretty(&response) {
                eprintln!("{}", body);
            }
            std::process::exit(1);
        }
    }
}
