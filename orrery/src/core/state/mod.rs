use glam::Vec3;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Index of the attractor inside every [`ParticleArena`].
pub const ATTRACTOR: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Particle {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }
}

/// Fixed-size, contiguous particle storage.
///
/// The length is decided at construction and cannot change afterwards: there is
/// no API to push or remove particles. Slot [`ATTRACTOR`] holds the sun.
///
/// The arena remembers the layout it was built with so a reset can restore it.
#[derive(Debug, Clone)]
pub struct ParticleArena {
    particles: Box<[Particle]>,
    initial: Box<[Particle]>,
}

impl ParticleArena {
    /// Builds an arena from explicit particles. Returns `None` when `particles` is empty,
    /// since there would be no attractor.
    pub fn from_particles(particles: Vec<Particle>) -> Option<Self> {
        if particles.is_empty() {
            return None;
        }
        let particles = particles.into_boxed_slice();
        Some(Self {
            initial: particles.clone(),
            particles,
        })
    }

    /// Lays out `count` particles around an attractor at the origin.
    ///
    /// Particle `i` is scattered inside a box whose half-extent depends on `i`
    /// (see [`spread`]); each axis gets independent jitter from `rng`.
    /// `count` is clamped to at least one.
    pub fn scattered<R: Rng>(count: usize, initial_velocity: Vec3, rng: &mut R) -> Self {
        let count = count.max(1);
        let mut particles = Vec::with_capacity(count);
        particles.push(Particle::new(Vec3::ZERO, Vec3::ZERO));

        for i in 1..count {
            let f = spread(i);
            let position = Vec3::new(
                f * rng.gen_range(0.0..1.0),
                f * rng.gen_range(0.0..1.0),
                f * rng.gen_range(0.0..1.0),
            );
            particles.push(Particle::new(position, initial_velocity));
        }

        let particles = particles.into_boxed_slice();
        Self {
            initial: particles.clone(),
            particles,
        }
    }

    /// Same as [`ParticleArena::scattered`], with a seeded or entropy-backed generator.
    pub fn seeded(count: usize, initial_velocity: Vec3, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::scattered(count, initial_velocity, &mut rng)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Always false: an arena holds at least the attractor.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn attractor(&self) -> &Particle {
        &self.particles[ATTRACTOR]
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// The attractor together with every orbiting particle, borrowed disjointly.
    pub fn split_attractor_mut(&mut self) -> (&Particle, &mut [Particle]) {
        let (head, tail) = self.particles.split_at_mut(ATTRACTOR + 1);
        (&head[ATTRACTOR], tail)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Restores the layout the arena was built with.
    pub fn reset(&mut self) {
        self.particles.copy_from_slice(&self.initial);
    }
}

/// Half-extent of the box particle `index` is scattered in.
///
/// The first hundred particles fan out linearly, later ones settle into a
/// band folded back past 50 units. Even indices mirror onto the negative octant.
pub fn spread(index: usize) -> f32 {
    let mut f = if index <= 100 {
        index as f32
    } else {
        index as f32 / 100.0 + 5.0
    };
    if f > 50.0 {
        f = 100.0 - f + 1.5;
    }
    if index % 2 == 0 {
        f = -f;
    }
    f
}
