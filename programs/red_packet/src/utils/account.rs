use anchor_lang::prelude::*;
use anchor_lang::system_program;

/// Deserializes a program-owned account, or returns `None` when it was never initialized
///
/// PDAs for unknown ids are valid addresses with no data; callers decide whether
/// that is an error (mutations) or an empty answer (reads).
pub fn try_load_account<T: AccountDeserialize>(info: &AccountInfo) -> Result<Option<T>> {
    if info.data_is_empty() || info.owner != &crate::ID {
        return Ok(None);
    }

    let data = info.try_borrow_data()?;
    let account = T::try_deserialize(&mut data.as_ref())?;
    Ok(Some(account))
}

/// Serializes `account` (discriminator included) back into its data buffer
pub fn store_account<T: AccountSerialize>(account: &T, info: &AccountInfo) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut dst: &mut [u8] = &mut data;
    account.try_serialize(&mut dst)
}

/// Grows `info` to `new_len` bytes, topping up rent from `payer` first
///
/// A no-op when the account is already large enough. One call may grow an
/// account by at most 10 KiB.
pub fn grow_account<'info>(
    info: &AccountInfo<'info>,
    payer: AccountInfo<'info>,
    system_program_info: AccountInfo<'info>,
    new_len: usize,
) -> Result<()> {
    if info.data_len() >= new_len {
        return Ok(());
    }

    let rent_due = Rent::get()?
        .minimum_balance(new_len)
        .saturating_sub(info.lamports());
    if rent_due > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program_info,
                system_program::Transfer {
                    from: payer,
                    to: info.clone(),
                },
            ),
            rent_due,
        )?;
    }

    info.realloc(new_len, false)?;
    Ok(())
}
