//! Generate static files

use anyhow::Result;

use crate::cms::DocumentService;
use crate::generator::Generator;
use crate::Blog;

/// Generate the static site
pub fn run(blog: &Blog, service: &dyn DocumentService) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(blog)?;
    generator.generate(service)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
