use anyhow::Result;
use hf_client::{HubClient, ModelInfo};

pub async fn run<C: HubClient + ?Sized>(client: &C, repo: &str) -> Result<()> {
    let info = client.model_info(repo).await?;
    println!("{}", render(&info));
    Ok(())
}

fn render(info: &ModelInfo) -> String {
    let files: Vec<&str> = info.siblings.iter().map(|s| s.rfilename.as_str()).collect();
    [
        format!("Repository:   {}", info.id),
        format!(
            "Library name: {}",
            info.library_name.as_deref().unwrap_or("-")
        ),
        format!(
            "Pipeline tag: {}",
            info.pipeline_tag.as_deref().unwrap_or("-")
        ),
        format!("Tags:         {}", info.tags.join(", ")),
        format!("Files:        {}", files.join(", ")),
    ]
    .join("\n")
}
