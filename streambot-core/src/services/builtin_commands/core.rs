use rand::Rng;

use streambot_common::Error;

use crate::services::command_service::CommandService;

pub(crate) fn echo(remainder: &str) -> Vec<String> {
    vec![remainder.to_string()]
}

pub(crate) fn random(remainder: &str) -> Vec<String> {
    let options: Vec<&str> = remainder.split_whitespace().collect();
    // format guarantees at least two options
    let choice = options[rand::rng().random_range(0..options.len())];
    vec![format!("Random choice: {}", choice)]
}

pub(crate) fn spongebob(remainder: &str) -> Vec<String> {
    let mocked: String = remainder
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i % 2 == 1 {
                c.to_uppercase().next().unwrap_or(c)
            } else {
                c.to_lowercase().next().unwrap_or(c)
            }
        })
        .collect();
    let url = "https://dannypage.github.io/assets/images/mocking-spongebob.jpg";
    vec![format!("{} - {}", mocked, url)]
}

pub(crate) async fn taco(
    svc: &CommandService,
    from_user: &str,
    remainder: &str,
) -> Result<Vec<String>, Error> {
    let to_user = remainder.trim();
    let count_name = format!("{}_tacos", to_user);
    let count = svc.counts.add(&count_name).await?;
    Ok(vec![
        format!("/me {} aggressively hurls a :taco: at {}", from_user, to_user),
        format!("{}: {}", count_name, count),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spongebob_alternates_case() {
        let out = spongebob("stop mimicking me");
        assert_eq!(
            out[0],
            "sToP MiMiCkInG Me - https://dannypage.github.io/assets/images/mocking-spongebob.jpg"
        );
    }

    #[test]
    fn random_picks_one_of_the_options() {
        let out = random("a b c");
        let expected = ["Random choice: a", "Random choice: b", "Random choice: c"];
        assert!(expected.contains(&out[0].as_str()));
    }
}
