use rand::rngs::SmallRng;
use rand::SeedableRng;
use smoke_wasm::config::ParticleConfig;
use smoke_wasm::particles::ParticleField;

#[test]
fn every_particle_lies_inside_its_bounds() {
    let config = ParticleConfig::default();
    for seed in 0..20 {
        let field = ParticleField::spawn(&config, &mut SmallRng::seed_from_u64(seed));
        assert_eq!(field.len(), 150);
        for p in field.particles() {
            assert!(config.x.contains(&p.position.x), "x {}", p.position.x);
            assert!(config.y.contains(&p.position.y), "y {}", p.position.y);
            assert!(config.z.contains(&p.position.z), "z {}", p.position.z);
            assert!(config.rotation.contains(&p.rotation_z));
        }
    }
}

#[test]
fn custom_bounds_are_honoured() {
    let config = ParticleConfig {
        count: 40,
        x: 0.0..1.0,
        y: 10.0..11.0,
        z: -5.0..-4.0,
        ..Default::default()
    };
    let field = ParticleField::spawn(&config, &mut SmallRng::seed_from_u64(11));
    assert_eq!(field.len(), 40);
    assert!(field.particles().iter().all(|p| {
        (0.0..1.0).contains(&p.position.x)
            && (10.0..11.0).contains(&p.position.y)
            && (-5.0..-4.0).contains(&p.position.z)
    }));
}
