use anyhow::Result;
use vyomgarud_shared::slugify;

pub fn run(text: &str) -> Result<()> {
    let slug = slugify(text);
    if slug.is_empty() {
        tracing::warn!("`{}` has no slug characters", text);
    }
    println!("{slug}");
    Ok(())
}
