use rand::Rng;

/// The appearance given to a hull in VRML output.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    /// Diffuse color.
    pub diffuse_color: [f32; 3],
    /// Ambient intensity.
    pub ambient_intensity: f32,
    /// Specular color.
    pub specular_color: [f32; 3],
    /// Emissive color.
    pub emissive_color: [f32; 3],
    /// Shininess.
    pub shininess: f32,
    /// Transparency.
    pub transparency: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: [0.5; 3],
            ambient_intensity: 0.4,
            specular_color: [0.5; 3],
            emissive_color: [0.0; 3],
            shininess: 0.4,
            transparency: 0.5,
        }
    }
}

impl Material {
    /// The default material with a random diffuse color that is never gray.
    ///
    /// Each channel is a multiple of `0.01` in `[0, 0.99]`, and the three
    /// channels are pairwise distinct.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            diffuse_color: random_color(rng),
            ..Self::default()
        }
    }
}

fn random_color<R: Rng>(rng: &mut R) -> [f32; 3] {
    loop {
        let color = [(); 3].map(|()| rng.gen_range(0..100u32) as f32 / 100.0);
        if color[0] != color[1] && color[1] != color[2] && color[0] != color[2] {
            return color;
        }
    }
}
