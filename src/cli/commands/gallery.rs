//! Gallery listing command.

use console::style;

use crate::config::Settings;
use crate::gallery::{Project, PROJECTS};

/// List gallery categories, flagging images missing from the public directory.
pub async fn cmd_gallery(settings: &Settings) -> anyhow::Result<()> {
    println!("{}", style("Gallery").bold());

    for project in PROJECTS {
        let missing = missing_images(settings, project);
        let slider = if project.images.len() > 1 {
            "slider"
        } else {
            "single"
        };

        println!(
            "\n{} {} ({} images, {})",
            style("●").cyan(),
            style(project.title).bold(),
            project.images.len(),
            slider
        );
        println!("  slug: {}  category: {}", project.slug, project.category);

        for image in project.images {
            let marker = if missing.contains(image) {
                style("✗").red()
            } else {
                style("✓").green()
            };
            println!("  {} {}", marker, image);
        }
    }

    Ok(())
}

/// Images of `project` that do not exist under the public directory.
fn missing_images(settings: &Settings, project: &Project) -> Vec<&'static str> {
    project
        .images
        .iter()
        .copied()
        .filter(|image| !settings.public_dir.join(image.trim_start_matches('/')).is_file())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_images() {
        let dir = tempdir().unwrap();
        let settings = Settings::with_public_dir(dir.path().to_path_buf());
        let project = &PROJECTS[0];

        assert_eq!(missing_images(&settings, project).len(), project.images.len());

        let resources = settings.resources_dir();
        std::fs::create_dir_all(&resources).unwrap();
        std::fs::write(resources.join("ilustracion.jpg"), b"jpg").unwrap();

        let missing = missing_images(&settings, project);
        assert_eq!(missing.len(), project.images.len() - 1);
        assert!(!missing.contains(&"/resources/ilustracion.jpg"));
    }
}
