use edu_primitives::{bits::Bits8, sdes};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let plaintext: Bits8 = "10101010".parse()?;
    println!("Plaintext: {}", plaintext);

    let ciphertext = sdes::encrypt_block(&plaintext, &sdes::DEMO_KEY);
    println!("Ciphertext: {}", ciphertext);

    let decrypted = sdes::decrypt_block(&ciphertext, &sdes::DEMO_KEY);
    println!("Decrypted Text: {}", decrypted);
    Ok(())
}
