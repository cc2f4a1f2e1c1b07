//! Drifting dots joined by faint lines, drawn behind the hero section.

const MIN_SPEED: f64 = 8.0;
const MAX_SPEED: f64 = 30.0;
const MIN_RADIUS: f64 = 1.0;
const MAX_RADIUS: f64 = 2.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Pixels per second.
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
}

impl ParticleField {
    pub fn new(particles: Vec<Particle>, width: f64, height: f64) -> Self {
        let mut field = Self {
            particles,
            width: width.max(0.0),
            height: height.max(0.0),
        };
        field.contain();
        field
    }

    /// Scatters `count` particles using `roll` as a source of `[0, 1)` samples.
    pub fn seeded(count: usize, width: f64, height: f64, mut roll: impl FnMut() -> f64) -> Self {
        let particles = (0..count)
            .map(|_| {
                let angle = roll() * std::f64::consts::TAU;
                let speed = MIN_SPEED + roll() * (MAX_SPEED - MIN_SPEED);
                Particle {
                    x: roll() * width,
                    y: roll() * height,
                    vx: angle.cos() * speed,
                    vy: angle.sin() * speed,
                    radius: MIN_RADIUS + roll() * (MAX_RADIUS - MIN_RADIUS),
                }
            })
            .collect();
        Self::new(particles, width, height)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Moves every particle by `dt` seconds, bouncing off the edges.
    pub fn step(&mut self, dt: f64) {
        for p in &mut self.particles {
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            reflect(&mut p.x, &mut p.vx, self.width);
            reflect(&mut p.y, &mut p.vy, self.height);
        }
    }

    /// Keeps particles at the same relative spot in the new box.
    pub fn resize(&mut self, width: f64, height: f64) {
        let (width, height) = (width.max(0.0), height.max(0.0));
        let sx = if self.width > 0.0 { width / self.width } else { 0.0 };
        let sy = if self.height > 0.0 { height / self.height } else { 0.0 };
        for p in &mut self.particles {
            p.x *= sx;
            p.y *= sy;
        }
        self.width = width;
        self.height = height;
        self.contain();
    }

    /// Pairs closer than `max_distance`, fading out linearly with distance.
    pub fn links(&self, max_distance: f64) -> Vec<Link> {
        let mut links = Vec::new();
        if max_distance <= 0.0 {
            return links;
        }
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let distance = (a.x - b.x).hypot(a.y - b.y);
                if distance < max_distance {
                    links.push(Link {
                        from: i,
                        to: j,
                        opacity: 1.0 - distance / max_distance,
                    });
                }
            }
        }
        links
    }

    fn contain(&mut self) {
        for p in &mut self.particles {
            p.x = p.x.clamp(0.0, self.width);
            p.y = p.y.clamp(0.0, self.height);
        }
    }
}

fn reflect(pos: &mut f64, velocity: &mut f64, limit: f64) {
    if *pos < 0.0 {
        *pos = -*pos;
        *velocity = velocity.abs();
    } else if *pos > limit {
        *pos = 2.0 * limit - *pos;
        *velocity = -velocity.abs();
    }
    // a step longer than the box can overshoot the mirror
    *pos = pos.clamp(0.0, limit);
}
