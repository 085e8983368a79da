/// Renderer statistics - per-frame counters with a colored console report

use colored::*;

/// Counters accumulated since the last reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererStats {
    pub clears: u32,
    pub draw_calls: u32,
    /// Meshes rejected by the camera frustum before rasterization
    pub meshes_culled: u32,
    pub triangles_submitted: u32,
    /// Triangles that survived clipping and face culling
    pub triangles_rasterized: u32,
    /// Covered samples that reached the stencil/depth tests
    pub fragments_tested: u64,
    /// Fragments that passed both tests
    pub fragments_passed: u64,
}

impl RendererStats {
    pub fn total_fragments_rejected(&self) -> u64 {
        self.fragments_tested.saturating_sub(self.fragments_passed)
    }

    /// Print the counters to stdout
    pub fn print_report(&self) {
        if self.draw_calls == 0 && self.clears == 0 {
            println!("\n{}", "✓ Nothing rendered".green().bold());
            return;
        }

        println!("\n{}", "=== Software Renderer Statistics ===".bright_blue().bold());
        println!("  {} {}", "Clears:".white().bold(), self.clears);
        println!("  {} {}", "Draw calls:".white().bold(), self.draw_calls);
        if self.meshes_culled > 0 {
            println!("  {} {}", "Meshes culled:".cyan(), self.meshes_culled);
        }
        println!(
            "  {} {} / {}",
            "Triangles:".white().bold(),
            self.triangles_rasterized,
            self.triangles_submitted
        );
        println!("  {} {}", "Fragments passed:".green(), self.fragments_passed);
        if self.total_fragments_rejected() > 0 {
            println!("  {} {}", "Fragments rejected:".yellow(), self.total_fragments_rejected());
        }
        println!("{}\n", "====================================".bright_blue().bold());
    }
}
